use dioxus::prelude::*;
use store::Observable;

/// Mirror a controller's state into a signal.
///
/// The controller keeps ownership of the state; the signal only ever holds a
/// snapshot, so no borrow outlives a render or crosses an `.await`.
pub fn use_observable<S: Clone + 'static>(observable: &Observable<S>) -> Signal<S> {
    let signal = use_signal(|| observable.get());
    use_hook(|| {
        observable.subscribe(move |state: &S| {
            let mut signal = signal;
            signal.set(state.clone());
        })
    });
    signal
}
