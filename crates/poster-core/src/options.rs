use crate::layout::SolverMode;
use crate::types::*;

/// Fixed parameters of the poster engine, injected at construction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Drop shadow look
    pub shadow: ShadowSpec,
    /// Style used for exactly five images
    pub poster: Style,
    /// Style used for six or more images
    pub dense: Style,
    /// How the tile width is brought back inside the canvas on overflow
    pub solver: SolverMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shadow: ShadowSpec::default(),
            poster: Style::poster(),
            dense: Style::dense(),
            solver: SolverMode::Linear,
        }
    }
}

impl EngineConfig {
    /// Style parameters for a preset
    pub fn style(&self, kind: StyleKind) -> &Style {
        match kind {
            StyleKind::Poster => &self.poster,
            StyleKind::Dense => &self.dense,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for kind in [StyleKind::Poster, StyleKind::Dense] {
            self.style(kind).validate().map_err(|e| match e {
                PosterError::Config(reason) => {
                    PosterError::Config(format!("{} style: {}", kind.name(), reason))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}
