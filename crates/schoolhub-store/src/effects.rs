//! One-shot effects.
//!
//! Stores never touch the UI directly. Toasts and navigation requests are
//! pushed onto an unbounded queue that the presentation tier drains; each
//! effect is received at most once.

use tokio::sync::mpsc;
use tracing::debug;

use crate::navigation::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShowToast(Toast),
    Navigate(Route),
    NavigateBack,
    /// Replace the whole back stack, e.g. after login or sign-out.
    ResetTo(Route),
}

pub fn effect_channel() -> (EffectSender, EffectReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EffectSender(tx), EffectReceiver(rx))
}

#[derive(Debug, Clone)]
pub struct EffectSender(mpsc::UnboundedSender<Effect>);

impl EffectSender {
    pub fn send(&self, effect: Effect) {
        if self.0.send(effect).is_err() {
            debug!("Effect dropped, no receiver");
        }
    }

    pub fn toast(&self, toast: Toast) {
        self.send(Effect::ShowToast(toast));
    }

    pub fn navigate(&self, route: Route) {
        self.send(Effect::Navigate(route));
    }

    pub fn back(&self) {
        self.send(Effect::NavigateBack);
    }
}

#[derive(Debug)]
pub struct EffectReceiver(mpsc::UnboundedReceiver<Effect>);

impl EffectReceiver {
    pub async fn recv(&mut self) -> Option<Effect> {
        self.0.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Effect> {
        self.0.try_recv().ok()
    }

    /// Takes every effect queued so far.
    pub fn drain(&mut self) -> Vec<Effect> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_are_consumed_once() {
        let (tx, mut rx) = effect_channel();
        tx.toast(Toast::success("Saved"));
        tx.back();

        assert_eq!(
            rx.drain(),
            vec![
                Effect::ShowToast(Toast::success("Saved")),
                Effect::NavigateBack
            ]
        );
        assert!(rx.try_recv().is_none());
    }

    #[test]
    fn test_send_without_receiver_is_silent() {
        let (tx, rx) = effect_channel();
        drop(rx);
        tx.navigate(Route::Dashboard);
    }
}
