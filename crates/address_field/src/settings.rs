//! Address field options and an in-memory configuration store.
//!
//! Keys live in the `AddressField/` section. A store can be seeded from TOML
//! where each table is a section:
//!
//! ```toml
//! [AddressField]
//! ShowUrlIcon = false
//! ```

use crate::collaborators::SettingsStore;
use crate::error::SettingsError;
use crate::memory::Subscribers;
use bus::FieldNotification;
use core_types::{SettingValue, SubscriptionId};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::mpsc::Sender;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldOption {
    ShowBookmarkIcon,
    ShowUrlIcon,
    ShowLoadPluginsIcon,
    SelectAllOnFocus,
    PasteAndGoOnMiddleClick,
}

impl FieldOption {
    pub const ALL: [FieldOption; 5] = [
        FieldOption::ShowBookmarkIcon,
        FieldOption::ShowUrlIcon,
        FieldOption::ShowLoadPluginsIcon,
        FieldOption::SelectAllOnFocus,
        FieldOption::PasteAndGoOnMiddleClick,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FieldOption::ShowBookmarkIcon => "AddressField/ShowBookmarkIcon",
            FieldOption::ShowUrlIcon => "AddressField/ShowUrlIcon",
            FieldOption::ShowLoadPluginsIcon => "AddressField/ShowLoadPluginsIcon",
            FieldOption::SelectAllOnFocus => "AddressField/SelectAllOnFocus",
            FieldOption::PasteAndGoOnMiddleClick => "AddressField/PasteAndGoOnMiddleClick",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.key() == key)
    }

    pub fn default_value(self) -> bool {
        true
    }
}

/// Reads a boolean option, falling back to its default when unset.
/// A non-boolean value reads as `false`.
pub fn read_bool(settings: &dyn SettingsStore, option: FieldOption) -> bool {
    match settings.value(option.key()) {
        None => option.default_value(),
        Some(value) => value.as_bool().unwrap_or_else(|| {
            log::warn!("option {} holds non-boolean value {value:?}", option.key());
            false
        }),
    }
}

/// Configuration store backed by a map, with change notifications.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RefCell<BTreeMap<String, SettingValue>>,
    subscribers: Subscribers,
}

impl MemorySettings {
    /// Empty store; every option reads as its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from a TOML document. Recognized options must be booleans.
    pub fn from_toml_str(document: &str) -> Result<Self, SettingsError> {
        let sections: BTreeMap<String, BTreeMap<String, SettingValue>> =
            toml::from_str(document)?;
        let mut values = BTreeMap::new();
        for (section, entries) in sections {
            for (name, value) in entries {
                let key = format!("{section}/{name}");
                if FieldOption::from_key(&key).is_some() && value.as_bool().is_none() {
                    return Err(SettingsError::UnexpectedValue { key });
                }
                values.insert(key, value);
            }
        }
        Ok(Self {
            values: RefCell::new(values),
            subscribers: Subscribers::default(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let document = std::fs::read_to_string(path)?;
        Self::from_toml_str(&document)
    }

    pub fn set_option(&self, option: FieldOption, enabled: bool) {
        self.set_value(option.key(), SettingValue::Bool(enabled));
    }

    pub fn subscribers(&self) -> &Subscribers {
        &self.subscribers
    }
}

impl SettingsStore for MemorySettings {
    fn value(&self, name: &str) -> Option<SettingValue> {
        self.values.borrow().get(name).cloned()
    }

    fn set_value(&self, name: &str, value: SettingValue) {
        let previous = self
            .values
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        if previous.as_ref() == Some(&value) {
            return;
        }
        self.subscribers.notify(FieldNotification::OptionChanged {
            name: name.to_string(),
            value,
        });
    }

    fn subscribe(&self, tx: Sender<FieldNotification>) -> SubscriptionId {
        self.subscribers.subscribe(tx)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn keys_round_trip() {
        for option in FieldOption::ALL {
            assert_eq!(FieldOption::from_key(option.key()), Some(option));
        }
        assert_eq!(FieldOption::from_key("Browser/HomePage"), None);
    }

    #[test]
    fn unset_options_read_as_default() {
        let settings = MemorySettings::new();
        assert!(read_bool(&settings, FieldOption::SelectAllOnFocus));
    }

    #[test]
    fn toml_seeds_values() {
        let settings = MemorySettings::from_toml_str(
            "[AddressField]\nShowUrlIcon = false\n\n[Browser]\nHomePage = \"about:blank\"\n",
        )
        .unwrap();
        assert!(!read_bool(&settings, FieldOption::ShowUrlIcon));
        assert_eq!(
            settings.value("Browser/HomePage"),
            Some(SettingValue::Text("about:blank".into()))
        );
    }

    #[test]
    fn toml_rejects_non_boolean_option() {
        let err = MemorySettings::from_toml_str("[AddressField]\nShowUrlIcon = 3\n").unwrap_err();
        assert!(matches!(
            err,
            SettingsError::UnexpectedValue { ref key } if key == "AddressField/ShowUrlIcon"
        ));
    }

    #[test]
    fn toml_syntax_errors_surface() {
        assert!(matches!(
            MemorySettings::from_toml_str("[AddressField"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn only_changes_are_announced() {
        let settings = MemorySettings::new();
        let (tx, rx) = mpsc::channel();
        let id = settings.subscribe(tx);

        settings.set_option(FieldOption::ShowBookmarkIcon, false);
        settings.set_option(FieldOption::ShowBookmarkIcon, false);
        settings.set_option(FieldOption::ShowBookmarkIcon, true);
        assert_eq!(rx.try_iter().count(), 2);

        settings.unsubscribe(id);
        settings.set_option(FieldOption::ShowBookmarkIcon, false);
        assert_eq!(rx.try_iter().count(), 0);
    }
}
