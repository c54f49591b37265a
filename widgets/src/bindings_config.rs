// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::BTreeMap, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{BindingTable, BoundAction, DEVELOPMENT_MODE, KeyPress, WidgetEngine,
            WidgetError, WidgetKind, WidgetResult};

/// Key bindings read from JSON, using the key names understood by
/// [`KeyPress::from_str`]. Example:
///
/// ```json
/// {
///   "remap": { "j": "down", "k": "up" },
///   "confirm": ["ctrl+d"],
///   "cancel": ["q"],
///   "early_exit": ["ctrl+c"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyBindingsConfig {
    /// Bound key name -> name of the key it stands for.
    pub remap: BTreeMap<String, String>,
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub early_exit: Vec<String>,
}

impl KeyBindingsConfig {
    /// # Errors
    ///
    /// [`WidgetError::BindingsConfig`] if the JSON is malformed.
    pub fn try_from_json_str(json: &str) -> WidgetResult<Self> {
        serde_json::from_str(json).map_err(|error| WidgetError::BindingsConfig {
            reason: error.to_string(),
        })
    }

    /// # Errors
    ///
    /// [`WidgetError::ContentsIo`] if the file can't be read, and
    /// [`WidgetError::BindingsConfig`] if its JSON is malformed.
    pub fn try_load_from_file(path: impl AsRef<Path>) -> WidgetResult<Self> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).map_err(|source| WidgetError::ContentsIo {
                path: path.to_path_buf(),
                source,
            })?;
        Self::try_from_json_str(&json)
    }

    /// Parse every key name up front, so a bad config changes nothing.
    ///
    /// # Errors
    ///
    /// [`WidgetError::InvalidKeyName`] for the first key name that can't be parsed.
    pub fn try_parse(&self) -> WidgetResult<Vec<(KeyPress, ParsedAction)>> {
        let mut acc = vec![];

        for (from, to) in &self.remap {
            acc.push((
                KeyPress::from_str(from)?,
                ParsedAction::Remap(KeyPress::from_str(to)?),
            ));
        }
        for it in &self.confirm {
            acc.push((KeyPress::from_str(it)?, ParsedAction::Confirm));
        }
        for it in &self.cancel {
            acc.push((KeyPress::from_str(it)?, ParsedAction::Cancel));
        }
        for it in &self.early_exit {
            acc.push((KeyPress::from_str(it)?, ParsedAction::EarlyExit));
        }

        Ok(acc)
    }

    /// Register every binding for `kind`. Returns how many were registered.
    ///
    /// # Errors
    ///
    /// [`WidgetError::InvalidKeyName`] for the first key name that can't be parsed, in
    /// which case `table` is left untouched.
    pub fn apply_to<E: WidgetEngine>(
        &self,
        kind: WidgetKind,
        table: &mut BindingTable<E>,
    ) -> WidgetResult<usize> {
        let parsed = self.try_parse()?;
        let count = parsed.len();

        for (key, action) in parsed {
            let _ = table.register(kind, key, action.into());
        }

        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(message = "applied key bindings", %kind, count);
        });

        Ok(count)
    }
}

/// The subset of [`BoundAction`] that can be written down in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedAction {
    Remap(KeyPress),
    Confirm,
    Cancel,
    EarlyExit,
}

impl<E: WidgetEngine> From<ParsedAction> for BoundAction<E> {
    fn from(it: ParsedAction) -> Self {
        match it {
            ParsedAction::Remap(key) => BoundAction::Remap(key),
            ParsedAction::Confirm => BoundAction::Confirm,
            ParsedAction::Cancel => BoundAction::Cancel,
            ParsedAction::EarlyExit => BoundAction::EarlyExit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScrollListEngine, SpecialKey, assert_eq2, keypress, try_create_temp_dir};

    const JSON: &str = r#"{
        "remap": { "j": "down", "k": "up" },
        "cancel": ["q"],
        "confirm": ["ctrl+d"]
    }"#;

    #[test]
    fn test_parse_json() {
        let config = KeyBindingsConfig::try_from_json_str(JSON).unwrap();
        assert_eq2!(config.remap.len(), 2);
        assert_eq2!(config.cancel, vec!["q".to_string()]);
        assert!(config.early_exit.is_empty());
    }

    #[test]
    fn test_apply_to_table() {
        let config = KeyBindingsConfig::try_from_json_str(JSON).unwrap();
        let mut table = BindingTable::<ScrollListEngine>::new();

        let count = config.apply_to(WidgetKind::ScrollList, &mut table).unwrap();
        assert_eq2!(count, 4);

        assert!(matches!(
            table.resolve(WidgetKind::ScrollList, keypress!(@char 'j')),
            Some(BoundAction::Remap(it)) if *it == keypress!(@special SpecialKey::Down)
        ));
        assert!(matches!(
            table.resolve(WidgetKind::ScrollList, KeyPress::ctrl('d')),
            Some(BoundAction::Confirm)
        ));
        assert!(!table.is_bound(WidgetKind::Viewer, keypress!(@char 'q')));
    }

    #[test]
    fn test_bad_key_name_leaves_table_untouched() {
        let config = KeyBindingsConfig::try_from_json_str(
            r#"{ "cancel": ["q", "notakey"] }"#,
        )
        .unwrap();
        let mut table = BindingTable::<ScrollListEngine>::new();

        let result = config.apply_to(WidgetKind::ScrollList, &mut table);
        assert!(matches!(result, Err(WidgetError::InvalidKeyName { .. })));
        assert!(table.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            KeyBindingsConfig::try_from_json_str(r#"{ "cancle": [] }"#),
            Err(WidgetError::BindingsConfig { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = try_create_temp_dir().unwrap();
        let path = dir.join("bindings.json");
        std::fs::write(&path, JSON).unwrap();

        let config = KeyBindingsConfig::try_load_from_file(&path).unwrap();
        assert_eq2!(config.confirm, vec!["ctrl+d".to_string()]);

        assert!(matches!(
            KeyBindingsConfig::try_load_from_file(dir.join("missing.json")),
            Err(WidgetError::ContentsIo { .. })
        ));
    }
}
