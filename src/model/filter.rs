use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryTab {
    Trending,
    Surge,
    DexScreener,
    PumpLive,
}

impl CategoryTab {
    pub const ALL: [CategoryTab; 4] = [
        CategoryTab::Trending,
        CategoryTab::Surge,
        CategoryTab::DexScreener,
        CategoryTab::PumpLive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Trending => "Trending",
            Self::Surge => "Surge",
            Self::DexScreener => "DEX Screener",
            Self::PumpLive => "Pump Live",
        }
    }

    /// Query-string form: lowercase label with the space replaced by a dash.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::Surge => "surge",
            Self::DexScreener => "dex-screener",
            Self::PumpLive => "pump-live",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl FromStr for CategoryTab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.slug() == needle || t.label().to_ascii_lowercase() == needle)
            .ok_or_else(|| AppError::InvalidFilter(format!("unknown tab '{}'", s)))
    }
}

impl fmt::Display for CategoryTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    OneMinute,
    FiveMinutes,
    ThirtyMinutes,
    OneHour,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::OneMinute,
        TimeWindow::FiveMinutes,
        TimeWindow::ThirtyMinutes,
        TimeWindow::OneHour,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl FromStr for TimeWindow {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.label() == needle)
            .ok_or_else(|| AppError::InvalidFilter(format!("unknown time window '{}'", s)))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Listing filters selected in the dashboard. They are forwarded to the
/// listing source but never change the returned collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenFilters {
    pub tab: CategoryTab,
    pub time: TimeWindow,
}

impl Default for TokenFilters {
    fn default() -> Self {
        Self {
            tab: CategoryTab::Surge,
            time: TimeWindow::FiveMinutes,
        }
    }
}

impl TokenFilters {
    pub fn query_pairs(&self) -> [(&'static str, &'static str); 2] {
        [("tab", self.tab.slug()), ("time", self.time.label())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_parses_slug_and_label() {
        assert_eq!("dex-screener".parse::<CategoryTab>().unwrap(), CategoryTab::DexScreener);
        assert_eq!("Pump Live".parse::<CategoryTab>().unwrap(), CategoryTab::PumpLive);
        assert!("hot".parse::<CategoryTab>().is_err());
    }

    #[test]
    fn tab_cycles_both_ways() {
        assert_eq!(CategoryTab::PumpLive.next(), CategoryTab::Trending);
        assert_eq!(CategoryTab::Trending.prev(), CategoryTab::PumpLive);
    }

    #[test]
    fn time_window_parse_is_exact() {
        assert_eq!("30m".parse::<TimeWindow>().unwrap(), TimeWindow::ThirtyMinutes);
        assert!("30M".parse::<TimeWindow>().is_err());
        assert_eq!(TimeWindow::OneHour.next(), TimeWindow::OneMinute);
    }
}
