// Map locations shown in the region sidebar

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapRegion {
    pub name: &'static str,
    pub areas: &'static [&'static str],
}

pub const MAP_TREE: &[MapRegion] = &[
    MapRegion {
        name: "Valley IV",
        areas: &[
            "The Hub",
            "Aburrey Quarry",
            "Valley Pass",
            "Power Plateau",
            "Origin Lodespring",
            "Originium Science Park",
        ],
    },
    MapRegion {
        name: "Wuling",
        areas: &["Jingyu Valley", "Wuling City"],
    },
];

/// Region by name, case-insensitive
pub fn find_region(name: &str) -> Option<&'static MapRegion> {
    MAP_TREE.iter().find(|r| r.name.eq_ignore_ascii_case(name))
}

/// Region containing the named area, case-insensitive
pub fn region_of(area: &str) -> Option<&'static MapRegion> {
    MAP_TREE
        .iter()
        .find(|r| r.areas.iter().any(|a| a.eq_ignore_ascii_case(area)))
}

/// Indented text rendering of the tree
pub fn render_tree() -> String {
    let mut out = String::new();
    for region in MAP_TREE {
        out.push_str(region.name);
        out.push('\n');
        for area in region.areas {
            out.push_str("  ");
            out.push_str(area);
            out.push('\n');
        }
    }
    out
}
