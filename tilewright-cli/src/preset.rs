//! Built-in region presets selectable with `--preset`.

/// A named region with fixed bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Preset {
    pub(crate) name: &'static str,
    pub(crate) title: &'static str,
    pub(crate) north: f64,
    pub(crate) south: f64,
    pub(crate) east: f64,
    pub(crate) west: f64,
}

pub(crate) const PRESETS: [Preset; 6] = [
    Preset {
        name: "toronto-downtown",
        title: "Toronto Downtown",
        north: 43.68,
        south: 43.62,
        east: -79.34,
        west: -79.40,
    },
    Preset {
        name: "toronto-gta",
        title: "Greater Toronto Area",
        north: 43.85,
        south: 43.60,
        east: -79.10,
        west: -79.65,
    },
    Preset {
        name: "vancouver-downtown",
        title: "Vancouver Downtown",
        north: 49.31,
        south: 49.24,
        east: -123.02,
        west: -123.18,
    },
    Preset {
        name: "calgary-downtown",
        title: "Calgary Downtown",
        north: 51.15,
        south: 51.00,
        east: -113.90,
        west: -114.20,
    },
    Preset {
        name: "ottawa-downtown",
        title: "Ottawa Downtown",
        north: 45.50,
        south: 45.35,
        east: -75.60,
        west: -75.80,
    },
    Preset {
        name: "montreal-downtown",
        title: "Montreal Downtown",
        north: 45.58,
        south: 45.45,
        east: -73.50,
        west: -73.70,
    },
];

pub(crate) fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.name == name)
}

pub(crate) fn names() -> String {
    PRESETS
        .iter()
        .map(|preset| preset.name)
        .collect::<Vec<_>>()
        .join(", ")
}
