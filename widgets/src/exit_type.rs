// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Why a widget stopped taking input. Reset to [`ExitType::Unset`] at the start of every
/// injected key; `Unset` is the only "still running" value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitType<P> {
    Unset,
    /// Confirmed, carrying the widget's payload (eg: the selected index).
    Normal(P),
    EscapeHit,
    /// Abnormal stop, eg: the key source failed.
    EarlyExit,
    /// Only set by callers that wrap activation with a deadline.
    Timeout,
}

impl<P> Default for ExitType<P> {
    fn default() -> Self { ExitType::Unset }
}

impl<P> ExitType<P> {
    #[must_use]
    pub fn is_unset(&self) -> bool { matches!(self, ExitType::Unset) }

    #[must_use]
    pub fn is_terminal(&self) -> bool { !self.is_unset() }

    #[must_use]
    pub fn payload(&self) -> Option<&P> {
        match self {
            ExitType::Normal(it) => Some(it),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_payload(self) -> Option<P> {
        match self {
            ExitType::Normal(it) => Some(it),
            _ => None,
        }
    }

    #[must_use]
    pub fn activation_state(&self) -> ActivationState {
        match self {
            ExitType::Unset => ActivationState::Running,
            ExitType::Normal(_) => ActivationState::NormalExit,
            ExitType::EscapeHit => ActivationState::EscapeExit,
            ExitType::EarlyExit | ExitType::Timeout => ActivationState::EarlyExit,
        }
    }
}

/// Shape of the activation state machine. `Running` is initial, every other state is
/// terminal, and the only transition is injecting an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ActivationState {
    Running,
    NormalExit,
    EscapeExit,
    EarlyExit,
}

impl<P> From<&ExitType<P>> for ActivationState {
    fn from(exit_type: &ExitType<P>) -> Self { exit_type.activation_state() }
}
