// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::HashMap,
          fmt::{Debug, Formatter}};

use serde::{Deserialize, Serialize};

use crate::{ExitType, KeyPress, WidgetEngine};

/// Every widget family has its own set of bindings.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    ScrollList,
    RadioList,
    SelectionList,
    ScrollWindow,
    Viewer,
    Entry,
}

/// Custom behavior for a bound key. It gets the widget's engine, so it can change the
/// widget's state, and returns the exit type to apply; [`ExitType::Unset`] keeps the
/// widget running.
pub trait KeyHandler<E: WidgetEngine> {
    fn handle_key(&mut self, engine: &mut E, key: KeyPress) -> ExitType<E::Payload>;
}

impl<E, F> KeyHandler<E> for F
where
    E: WidgetEngine,
    F: FnMut(&mut E, KeyPress) -> ExitType<E::Payload>,
{
    fn handle_key(&mut self, engine: &mut E, key: KeyPress) -> ExitType<E::Payload> {
        self(engine, key)
    }
}

/// What a bound key does instead of the widget's built-in handling.
pub enum BoundAction<E: WidgetEngine> {
    /// Treat the key as if this other key was pressed.
    Remap(KeyPress),
    /// Exit normally with the widget's current payload.
    Confirm,
    /// Exit as if Esc was pressed.
    Cancel,
    EarlyExit,
    Handler(Box<dyn KeyHandler<E>>),
}

impl<E: WidgetEngine> Debug for BoundAction<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundAction::Remap(it) => f.debug_tuple("Remap").field(it).finish(),
            BoundAction::Confirm => write!(f, "Confirm"),
            BoundAction::Cancel => write!(f, "Cancel"),
            BoundAction::EarlyExit => write!(f, "EarlyExit"),
            BoundAction::Handler(_) => write!(f, "Handler"),
        }
    }
}

impl<E: WidgetEngine> BoundAction<E> {
    pub fn handler(it: impl KeyHandler<E> + 'static) -> Self {
        BoundAction::Handler(Box::new(it))
    }
}

/// Key overrides for a widget, filled in when the widget is set up. A bound key
/// replaces the widget's built-in handling for that key entirely.
pub struct BindingTable<E: WidgetEngine> {
    map: HashMap<(WidgetKind, KeyPress), BoundAction<E>>,
}

impl<E: WidgetEngine> Default for BindingTable<E> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<E: WidgetEngine> Debug for BindingTable<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

impl<E: WidgetEngine> BindingTable<E> {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns the action that was previously bound to this key, if any.
    pub fn register(
        &mut self,
        kind: WidgetKind,
        key: KeyPress,
        action: BoundAction<E>,
    ) -> Option<BoundAction<E>> {
        self.map.insert((kind, key), action)
    }

    pub fn unregister(&mut self, kind: WidgetKind, key: KeyPress) -> Option<BoundAction<E>> {
        self.map.remove(&(kind, key))
    }

    #[must_use]
    pub fn resolve(&self, kind: WidgetKind, key: KeyPress) -> Option<&BoundAction<E>> {
        self.map.get(&(kind, key))
    }

    /// Handlers are [`FnMut`], so running one needs mutable access.
    pub fn resolve_mut(
        &mut self,
        kind: WidgetKind,
        key: KeyPress,
    ) -> Option<&mut BoundAction<E>> {
        self.map.get_mut(&(kind, key))
    }

    #[must_use]
    pub fn is_bound(&self, kind: WidgetKind, key: KeyPress) -> bool {
        self.map.contains_key(&(kind, key))
    }

    #[must_use]
    pub fn len(&self) -> usize { self.map.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    pub fn clear(&mut self) { self.map.clear(); }
}
