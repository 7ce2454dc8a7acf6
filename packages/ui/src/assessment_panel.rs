use dioxus::prelude::*;
use store::{PatientAssessment, RiskLevel};

use crate::display::assessment_rows;

/// Diabetes risk assessment, fetched on demand.
///
/// Age, trigger count and risk label are shown exactly as the assessment
/// service returned them; only the colour is derived locally.
#[component]
pub fn AssessmentPanel(
    assessment: Option<PatientAssessment>,
    assessing: bool,
    on_request: EventHandler<()>,
) -> Element {
    rsx! {
        section {
            class: "assessment-panel",
            div {
                class: "assessment-header",
                h3 { "Évaluation du risque de diabète" }
                button {
                    class: "btn primary",
                    onclick: move |_| on_request.call(()),
                    if assessing { "Évaluation…" } else { "Évaluer" }
                }
            }
            if let Some(assessment) = assessment {
                dl {
                    class: "assessment-result",
                    for (label, value) in assessment_rows(&assessment) {
                        dt { "{label}" }
                        dd { "{value}" }
                    }
                    dt { "Risque" }
                    dd {
                        span {
                            class: RiskLevel::from_label(&assessment.risk).css_class(),
                            "{assessment.risk}"
                        }
                    }
                }
            }
        }
    }
}
