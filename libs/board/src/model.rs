//! Core data types and the persisted document format.

use serde::{Deserialize, Serialize};

/// District names used when a loaded document has no districts at all.
pub const DEFAULT_DISTRICTS: [&str; 3] = ["District 1", "District 2", "District 3"];

/// Kind of a board item: a volunteer or a household.
///
/// The wire tags (`"bro"` / `"fam"`) match the stored document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    #[serde(rename = "bro")]
    Brother,
    #[serde(rename = "fam")]
    Family,
}

impl ItemKind {
    /// Wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Brother => "bro",
            ItemKind::Family => "fam",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "bro" | "brother" => Some(ItemKind::Brother),
            "fam" | "family" => Some(ItemKind::Family),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Brother => "brother",
            ItemKind::Family => "family",
        }
    }

    /// The other kind.
    pub fn other(&self) -> Self {
        match self {
            ItemKind::Brother => ItemKind::Family,
            ItemKind::Family => ItemKind::Brother,
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One pairing slot: zero or more brothers matched with zero or more families.
///
/// Identity is purely positional — indices are renumbered on every render and
/// never persisted. Neither slot list has an upper bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Companionship {
    #[serde(default)]
    pub brothers: Vec<String>,
    #[serde(default)]
    pub families: Vec<String>,
}

impl Companionship {
    /// True when both slot lists are empty. Empty companionships stay visible
    /// in a live session but are dropped from the serialized document.
    pub fn is_empty(&self) -> bool {
        self.brothers.is_empty() && self.families.is_empty()
    }

    /// The slot list accepting the given kind.
    pub fn slot(&self, kind: ItemKind) -> &[String] {
        match kind {
            ItemKind::Brother => &self.brothers,
            ItemKind::Family => &self.families,
        }
    }

    pub(crate) fn slot_mut(&mut self, kind: ItemKind) -> &mut Vec<String> {
        match kind {
            ItemKind::Brother => &mut self.brothers,
            ItemKind::Family => &mut self.families,
        }
    }
}

/// A named, ordered group of companionships.
///
/// The name is the persistence key; document order is meaningful and is
/// preserved through serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct District {
    pub name: String,
    pub comps: Vec<Companionship>,
}

impl District {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comps: Vec::new(),
        }
    }
}

/// The full persisted snapshot: every district's companionships plus both
/// master lists. Read and written whole — there is no partial-field update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// District name -> companionship list, in document order.
    #[serde(with = "district_map", default)]
    pub comps: Vec<District>,

    /// Master list of known brother names.
    #[serde(rename = "masterBros", default)]
    pub master_bros: Vec<String>,

    /// Master list of known family names.
    #[serde(rename = "masterFams", default)]
    pub master_fams: Vec<String>,
}

/// Serde adapter for the `comps` field: a `Vec<District>` on the Rust side,
/// an order-preserving JSON object on the wire.
pub mod district_map {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use super::{Companionship, District};

    pub fn serialize<S>(districts: &[District], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(districts.len()))?;
        for district in districts {
            map.serialize_entry(&district.name, &district.comps)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<District>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DistrictMapVisitor;

        impl<'de> Visitor<'de> for DistrictMapVisitor {
            type Value = Vec<District>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of district name to companionship list")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut districts = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, comps)) =
                    access.next_entry::<String, Vec<Companionship>>()?
                {
                    districts.push(District { name, comps });
                }
                Ok(districts)
            }
        }

        deserializer.deserialize_map(DistrictMapVisitor)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct DistrictMap(#[serde(with = "district_map")] Vec<District>);

/// Serialize a district list to its wire shape (ordered JSON object).
pub fn districts_to_value(districts: &[District]) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(DistrictMap(districts.to_vec()))
}

/// Parse a district list from its wire shape.
pub fn districts_from_value(value: serde_json::Value) -> Result<Vec<District>, serde_json::Error> {
    serde_json::from_value::<DistrictMap>(value).map(|m| m.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_order_survives_the_wire() {
        let json = r#"{
            "comps": {
                "Zeta": [{"brothers": ["Bob"], "families": []}],
                "Alpha": [{"brothers": [], "families": ["Smith"]}]
            },
            "masterBros": ["Bob"],
            "masterFams": ["Smith"]
        }"#;

        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.comps[0].name, "Zeta");
        assert_eq!(doc.comps[1].name, "Alpha");

        let out = serde_json::to_string(&doc).unwrap();
        let zeta = out.find("Zeta").unwrap();
        let alpha = out.find("Alpha").unwrap();
        assert!(zeta < alpha, "serialized order must match document order");
    }

    #[test]
    fn missing_slot_lists_default_to_empty() {
        let comp: Companionship = serde_json::from_str(r#"{"brothers": ["Bob"]}"#).unwrap();
        assert_eq!(comp.brothers, vec!["Bob"]);
        assert!(comp.families.is_empty());
    }

    #[test]
    fn document_defaults_are_empty() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert!(doc.comps.is_empty());
        assert!(doc.master_bros.is_empty());
        assert!(doc.master_fams.is_empty());
    }

    #[test]
    fn item_kind_wire_tags() {
        assert_eq!(ItemKind::Brother.as_str(), "bro");
        assert_eq!(ItemKind::from_str("fam"), Some(ItemKind::Family));
        assert_eq!(ItemKind::from_str("household"), None);
        assert_eq!(ItemKind::Brother.other(), ItemKind::Family);
    }
}
