use nested_scroll::{AxisLock, ConfigError, ScrollMode, ScrollOptions};

/// Property keys understood by [`HostConfig::set_property`].
pub const PROPERTY_KEYS: [&str; 8] = [
    "scrollEnabled",
    "bouncesEnabled",
    "pagingEnabled",
    "flingEnabled",
    "scrollWithParent",
    "scrollForwardMode",
    "scrollBackwardMode",
    "axisLock",
];

/// Scroll configuration as a host declares it: string-keyed properties, any of which may be
/// left unset.
///
/// Unset fields keep whatever the target [`ScrollOptions`] already holds when the config is
/// applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct HostConfig {
    pub scroll_enabled: Option<bool>,
    pub bounces_enabled: Option<bool>,
    pub paging_enabled: Option<bool>,
    pub fling_enabled: Option<bool>,
    pub scroll_with_parent: Option<bool>,
    pub scroll_forward_mode: Option<ScrollMode>,
    pub scroll_backward_mode: Option<ScrollMode>,
    pub axis_lock: Option<AxisLock>,
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a config from properties, resolving invalid values leniently.
    pub fn from_properties<'a>(properties: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut config = Self::new();
        for (key, value) in properties {
            config.set_property_lenient(key, value);
        }
        config
    }

    /// Sets one property, rejecting unknown keys and malformed values.
    pub fn set_property(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "scrollEnabled" => self.scroll_enabled = Some(parse_flag(key, value)?),
            "bouncesEnabled" => self.bounces_enabled = Some(parse_flag(key, value)?),
            "pagingEnabled" => self.paging_enabled = Some(parse_flag(key, value)?),
            "flingEnabled" => self.fling_enabled = Some(parse_flag(key, value)?),
            "scrollWithParent" => self.scroll_with_parent = Some(parse_flag(key, value)?),
            "scrollForwardMode" => self.scroll_forward_mode = Some(value.parse()?),
            "scrollBackwardMode" => self.scroll_backward_mode = Some(value.parse()?),
            "axisLock" => self.axis_lock = Some(value.parse()?),
            _ => return Err(ConfigError::UnknownKey(key.to_owned())),
        }
        Ok(())
    }

    /// Sets one property, resolving errors to documented defaults.
    ///
    /// - invalid scroll modes resolve to [`ScrollMode::SelfFirst`]
    /// - invalid axis locks resolve to [`AxisLock::Vertical`]
    /// - malformed flags and unknown keys are ignored
    ///
    /// Returns `false` (after logging a warning) when the value had to be resolved.
    pub fn set_property_lenient(&mut self, key: &str, value: &str) -> bool {
        let Err(err) = self.set_property(key, value) else {
            return true;
        };
        awarn!(key, value, error = %err, "resolving invalid scroll configuration");
        match err {
            ConfigError::UnknownScrollMode(_) if key == "scrollForwardMode" => {
                self.scroll_forward_mode = Some(ScrollMode::SelfFirst);
            }
            ConfigError::UnknownScrollMode(_) => {
                self.scroll_backward_mode = Some(ScrollMode::SelfFirst);
            }
            ConfigError::UnknownAxisLock(_) => self.axis_lock = Some(AxisLock::default()),
            ConfigError::InvalidFlag { .. } | ConfigError::UnknownKey(_) => {}
        }
        false
    }

    /// Applies every set field on top of `options`.
    pub fn apply(&self, mut options: ScrollOptions) -> ScrollOptions {
        if let Some(v) = self.scroll_enabled {
            options.scroll_enabled = v;
        }
        if let Some(v) = self.bounces_enabled {
            options.bounces_enabled = v;
        }
        if let Some(v) = self.paging_enabled {
            options.paging_enabled = v;
        }
        if let Some(v) = self.fling_enabled {
            options.fling_enabled = v;
        }
        if let Some(v) = self.scroll_with_parent {
            options.scroll_with_parent = v;
        }
        if let Some(v) = self.scroll_forward_mode {
            options.forward_mode = v;
        }
        if let Some(v) = self.scroll_backward_mode {
            options.backward_mode = v;
        }
        if let Some(v) = self.axis_lock {
            options.axis_lock = v;
        }
        options
    }
}

/// Parses a boolean property (`true`/`false`, `1`/`0`, `yes`/`no`, case-insensitive).
pub fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key: key.to_owned(),
            value: value.to_owned(),
        }),
    }
}
