use crate::config::WidgetConfig;
use crate::signal::Updated;

/// Bounded quantity control.
///
/// Accepts raw string input and steps, clamps silently, and reports exactly
/// one [`Updated`] per actual change. The owner is responsible for writing
/// the stored value back into the visible input after every attempt,
/// accepted or not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmountWidget {
    value: u32,
    min: u32,
    max: u32,
}

/// One user-level edit of a quantity control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AmountEdit {
    Set(String),
    Increase,
    Decrease,
}

impl AmountWidget {
    /// Builds a widget from optional raw input. A raw value that parses to an
    /// in-bounds integer becomes the starting value; anything else falls back
    /// to the configured default.
    pub fn new(initial: Option<&str>, config: &WidgetConfig) -> Self {
        let mut widget =
            Self { value: config.default_value, min: config.min, max: config.max };
        if let Some(raw) = initial {
            widget.set(raw);
        }
        widget
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn set(&mut self, raw: &str) -> Option<Updated> {
        let candidate = raw.trim().parse::<i64>().ok()?;
        self.apply(candidate)
    }

    pub fn increase(&mut self) -> Option<Updated> {
        self.apply(i64::from(self.value) + 1)
    }

    pub fn decrease(&mut self) -> Option<Updated> {
        self.apply(i64::from(self.value) - 1)
    }

    pub fn edit(&mut self, edit: &AmountEdit) -> Option<Updated> {
        match edit {
            AmountEdit::Set(raw) => self.set(raw),
            AmountEdit::Increase => self.increase(),
            AmountEdit::Decrease => self.decrease(),
        }
    }

    fn apply(&mut self, candidate: i64) -> Option<Updated> {
        let candidate = u32::try_from(candidate).ok()?;
        if candidate < self.min || candidate > self.max || candidate == self.value {
            return None;
        }
        self.value = candidate;
        Some(Updated)
    }
}
