mod login;
pub use login::Login;

mod patients;
pub use patients::PatientList;

mod patient_detail;
pub use patient_detail::PatientDetail;
