use std::fmt;
use std::path::PathBuf;

use crate::api::types::MapId;

/// Errors surfaced to the caller. Recoverable map anomalies are reported
/// as [`Diagnostic`]s instead.
#[derive(Debug)]
pub enum WorldError {
    /// The map id is not registered with the map source.
    UnknownMap(MapId),
    /// Unit scale must be finite and greater than zero.
    InvalidScale(f32),
    /// A registered map could not be read or parsed.
    MapLoad { map: MapId, reason: String },
    /// The world manifest is not valid JSON for its schema.
    Manifest(serde_json::Error),
    /// A file the world needs could not be read.
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::UnknownMap(map) => write!(f, "unknown map '{map}'"),
            WorldError::InvalidScale(scale) => {
                write!(f, "invalid unit scale {scale}, must be greater than zero")
            }
            WorldError::MapLoad { map, reason } => {
                write!(f, "failed to load map '{map}': {reason}")
            }
            WorldError::Manifest(why) => write!(f, "invalid world manifest: {why}"),
            WorldError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorldError::Manifest(why) => Some(why),
            WorldError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Which object layer a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Collision,
    Spawns,
    Portals,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Collision => f.write_str("collision"),
            LayerKind::Spawns => f.write_str("spawn"),
            LayerKind::Portals => f.write_str("portal"),
        }
    }
}

/// A condition the world recovered from on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The map has no such layer; collision passes everywhere, or no portals fire.
    LayerMissing { map: MapId, layer: LayerKind },
    /// No player spawn marker could be resolved; the player starts at (0, 0).
    SpawnNotFound { map: MapId },
    /// A portal without a destination name was entered and ignored.
    InvalidPortalDestination { map: MapId },
    /// A portal's destination could not be loaded; the player stayed on `map`.
    TransitionFailed { map: MapId, destination: MapId },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::LayerMissing { map, layer } => write!(f, "{map}: no {layer} layer"),
            Diagnostic::SpawnNotFound { map } => write!(f, "{map}: no player spawn found"),
            Diagnostic::InvalidPortalDestination { map } => {
                write!(f, "{map}: portal map name missing")
            }
            Diagnostic::TransitionFailed { map, destination } => {
                write!(f, "{map}: portal to {destination} could not be loaded")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_map() {
        let err = WorldError::UnknownMap(MapId::from("ATLANTIS"));
        assert_eq!(err.to_string(), "unknown map 'ATLANTIS'");

        let diag = Diagnostic::LayerMissing { map: MapId::from("TOWN"), layer: LayerKind::Portals };
        assert_eq!(diag.to_string(), "TOWN: no portal layer");

        let diag = Diagnostic::TransitionFailed {
            map: MapId::from("TOWN"),
            destination: MapId::from("ATLANTIS"),
        };
        assert_eq!(diag.to_string(), "TOWN: portal to ATLANTIS could not be loaded");
    }

    #[test]
    fn manifest_error_has_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = WorldError::Manifest(json_err);
        assert!(std::error::Error::source(&err).is_some());
    }
}
