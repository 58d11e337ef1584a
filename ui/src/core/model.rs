//! Worklet records and the closed label sets the dashboard groups them by.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A closed enumeration rendered as a chart group.
///
/// `ALL` is the declared order. Counts, bars, donut segments, legends and
/// exports all iterate in this order, never in insertion or sorted order.
pub trait Category: Copy + Eq + fmt::Debug + 'static {
    const ALL: &'static [Self];

    /// Canonical display label (also the wire format).
    fn label(self) -> &'static str;

    fn from_label(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|category| category.label() == raw)
    }

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|category| *category == self)
            .unwrap_or(0)
    }
}

macro_rules! closed_category {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $variant ),+
        }

        impl Category for $name {
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

closed_category! {
    /// Lifecycle stage of a worklet.
    pub enum WorkletStatus {
        Completed => "Completed",
        Ongoing => "Ongoing",
        OnHold => "On Hold",
        Dropped => "Dropped",
        Terminated => "Terminated",
    }
}

closed_category! {
    /// Raw graded label attached to a worklet by its mentors.
    pub enum Quality {
        Excellence => "Excellence",
        VeryGood => "Very Good",
        Good => "Good",
        Average => "Average",
        NeedsAttention => "Needs Attention",
    }
}

closed_category! {
    /// Coarse scale used by the ongoing-performance chart.
    pub enum PerformanceBucket {
        Excellent => "Excellent",
        VeryGood => "Very Good",
        Good => "Good",
        Average => "Average",
        Poor => "Poor",
    }
}

closed_category! {
    pub enum RiskLevel {
        High => "High Risk",
        Medium => "Medium Risk",
        Low => "Low Risk",
    }
}

closed_category! {
    /// KPI tiles on the engagement card.
    pub enum EngagementMetric {
        Students => "Students",
        Professors => "Professors",
        Mentors => "Mentors",
        Worklets => "Worklets",
        Papers => "Papers",
        Patents => "Patents",
    }
}

/// A label as supplied by the data provider: either one of the closed set or
/// something the dashboard does not recognise. Unknown labels survive
/// deserialization so one bad record never sinks the whole dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label<C> {
    Known(C),
    Unknown(String),
}

impl<C: Category> Label<C> {
    pub fn parse(raw: &str) -> Self {
        match C::from_label(raw) {
            Some(category) => Label::Known(category),
            None => Label::Unknown(raw.to_string()),
        }
    }

    pub fn known(&self) -> Option<C> {
        match self {
            Label::Known(category) => Some(*category),
            Label::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Label::Known(category) => category.label(),
            Label::Unknown(raw) => raw.as_str(),
        }
    }
}

impl<C: Category> From<C> for Label<C> {
    fn from(category: C) -> Self {
        Label::Known(category)
    }
}

impl<C: Category> fmt::Display for Label<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<C: Category> Serialize for Label<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, C: Category> Deserialize<'de> for Label<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Label::parse(&raw))
    }
}

/// A tracked unit of work. Read-only as far as the dashboard is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worklet {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub status: Label<WorkletStatus>,
    pub quality: Label<Quality>,
    #[serde(default)]
    pub students: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl Worklet {
    /// Minimal record from raw labels; mostly useful for fixtures.
    pub fn new<T: Into<String>>(id: T, status: &str, quality: &str) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            status: Label::parse(status),
            quality: Label::parse(quality),
            students: Vec::new(),
            team: None,
            year: None,
        }
    }

    pub fn with_students<I, S>(mut self, students: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.students = students.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_ongoing(&self) -> bool {
        self.status.known() == Some(WorkletStatus::Ongoing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_label() {
        for status in WorkletStatus::ALL {
            assert_eq!(WorkletStatus::from_label(status.label()), Some(*status));
        }
        assert_eq!(WorkletStatus::from_label("On Hold"), Some(WorkletStatus::OnHold));
        assert_eq!(WorkletStatus::from_label("on hold"), None);
    }

    #[test]
    fn declared_order_is_stable() {
        let labels: Vec<_> = RiskLevel::ALL.iter().map(|level| level.label()).collect();
        assert_eq!(labels, ["High Risk", "Medium Risk", "Low Risk"]);
        assert_eq!(RiskLevel::Low.position(), 2);
    }

    #[test]
    fn unknown_labels_survive_deserialization() {
        let raw = r#"{
            "id": "w-9",
            "status": "Paused",
            "quality": "Good",
            "students": ["a", "b"]
        }"#;
        let worklet: Worklet = serde_json::from_str(raw).unwrap();
        assert_eq!(worklet.status, Label::Unknown("Paused".into()));
        assert_eq!(worklet.quality.known(), Some(Quality::Good));
        assert_eq!(worklet.students.len(), 2);
        assert!(!worklet.is_ongoing());

        let json = serde_json::to_value(&worklet).unwrap();
        assert_eq!(json["status"], "Paused");
        assert_eq!(json["quality"], "Good");
    }
}
