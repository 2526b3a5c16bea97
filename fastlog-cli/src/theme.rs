//! Console color theme
//!
//! Renderers receive a [`Theme`] value instead of consulting a global color flag.
//! A plain theme never emits ANSI escape sequences.

use std::fmt::Display;

use colored::{Color, Colorize};

use fastlog_core::types::{ClassificationTier, PriorityTier};

/// Named text styles used by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Section rules and titles.
    Header,
    /// Informational messages.
    Info,
    /// Successful operations and counts.
    Success,
    /// Warnings.
    Warning,
    /// Errors.
    Error,
    /// Highlighted values (IPs, ids).
    Accent,
    /// Emphasized value without a color change.
    Strong,
    /// Priority value, colored by tier.
    Priority(PriorityTier),
    /// Classification text, colored by keyword.
    Classification(ClassificationStyle),
    /// White on red banner.
    CriticalBanner,
    /// Black on yellow banner.
    WarningBanner,
}

/// Classification color bucket.
///
/// Trojans get their own color ahead of the generic malware tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationStyle {
    Trojan,
    Tier(ClassificationTier),
}

impl ClassificationStyle {
    pub fn from_classification(classification: &str) -> Self {
        if classification.to_lowercase().contains("trojan") {
            Self::Trojan
        } else {
            Self::Tier(ClassificationTier::from_classification(classification))
        }
    }
}

/// Color theme passed to every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: bool,
}

impl Theme {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Theme that never emits escape sequences.
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    /// Render `text` in the given style.
    pub fn paint(&self, text: impl Display, style: Style) -> String {
        let text = text.to_string();
        if !self.color {
            return text;
        }

        let styled = match style {
            Style::Header => text.cyan().bold(),
            Style::Info => text.cyan(),
            Style::Success => text.green(),
            Style::Warning => text.yellow(),
            Style::Error => text.red(),
            Style::Accent => text.yellow(),
            Style::Strong => text.bold(),
            Style::Priority(tier) => match tier {
                PriorityTier::Critical => text.red().bold(),
                PriorityTier::High => text.yellow().bold(),
                PriorityTier::Informational => text.cyan(),
                PriorityTier::Neutral => text.white(),
            },
            Style::Classification(class) => match class {
                ClassificationStyle::Trojan => text.red().bold(),
                ClassificationStyle::Tier(ClassificationTier::Malware) => text.magenta().bold(),
                ClassificationStyle::Tier(ClassificationTier::High) => text.yellow().bold(),
                ClassificationStyle::Tier(ClassificationTier::Elevated) => text.red(),
                ClassificationStyle::Tier(ClassificationTier::Scan) => text.blue().bold(),
                ClassificationStyle::Tier(ClassificationTier::Neutral) => text.white(),
            },
            Style::CriticalBanner => text.color(Color::White).on_red().bold(),
            Style::WarningBanner => text.color(Color::Black).on_yellow().bold(),
        };
        styled.to_string()
    }

    /// Style for a priority value.
    pub fn priority(&self, priority: u64) -> String {
        self.paint(priority, Style::Priority(PriorityTier::from_priority(priority)))
    }

    /// Style for a classification text.
    pub fn classification(&self, classification: &str) -> String {
        self.paint(
            classification,
            Style::Classification(ClassificationStyle::from_classification(classification)),
        )
    }
}
