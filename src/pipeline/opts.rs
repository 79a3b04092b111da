use std::{fmt, path::Path, str::FromStr};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{AspectRatio, Rgba8},
        error::{StackError, StackResult},
    },
    layout::{
        grid::{GridLayoutSpec, compose_grid},
        strip::{StripLayoutSpec, compose_strip},
    },
    raster::frame::RasterImage,
};

/// Default spacing between composed images, in pixels.
pub const DEFAULT_SPACING: u32 = 20;

/// How pages are combined into output images.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ComposeMode {
    /// Pages pass through unmerged.
    #[default]
    #[serde(rename = "single")]
    Single,
    /// 2x2 mosaics of four pages.
    #[serde(rename = "grid-2x2")]
    Grid2x2,
    /// 3x3 mosaics of nine pages.
    #[serde(rename = "grid-3x3")]
    Grid3x3,
    /// Vertical strips of `group_size` pages.
    #[serde(rename = "long")]
    Long,
}

impl ComposeMode {
    /// Stable identifier, as accepted by [`FromStr`] and serde.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Grid2x2 => "grid-2x2",
            Self::Grid3x3 => "grid-3x3",
            Self::Long => "long",
        }
    }

    /// Grid column count, for grid modes.
    pub fn grid_columns(self) -> Option<u32> {
        match self {
            Self::Grid2x2 => Some(2),
            Self::Grid3x3 => Some(3),
            Self::Single | Self::Long => None,
        }
    }

    /// Group size fixed by the mode itself, for grid modes.
    pub fn fixed_group_size(self) -> Option<usize> {
        self.grid_columns().map(|c| (c * c) as usize)
    }

    /// File-name stem for composites: `{stem}-{n}.png`.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Long => "merged",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for ComposeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComposeMode {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "grid-2x2" => Ok(Self::Grid2x2),
            "grid-3x3" => Ok(Self::Grid3x3),
            "long" => Ok(Self::Long),
            other => Err(StackError::invalid_argument(format!(
                "unknown compose mode \"{other}\" (expected single, grid-2x2, grid-3x3, long)"
            ))),
        }
    }
}

/// Batch composition options, loadable from JSON.
///
/// ```json
/// { "mode": "long", "group_size": 3, "spacing": 20, "background": "#ffffff", "aspect_ratio": "9:16" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeOpts {
    /// Output mode.
    pub mode: ComposeMode,
    /// Pixels between images (grid cells or strip rows).
    pub spacing: u32,
    /// Canvas fill and cell padding color.
    pub background: Rgba8,
    /// Target canvas ratio for `long` mode.
    pub aspect_ratio: Option<AspectRatio>,
    /// Pages per strip in `long` mode. Ignored by grid modes.
    pub group_size: usize,
}

impl Default for ComposeOpts {
    fn default() -> Self {
        Self {
            mode: ComposeMode::Single,
            spacing: DEFAULT_SPACING,
            background: Rgba8::WHITE,
            aspect_ratio: None,
            group_size: 0,
        }
    }
}

impl ComposeOpts {
    /// Parse options from a JSON document and validate them.
    pub fn from_json_str(s: &str) -> StackResult<Self> {
        let opts: Self = serde_json::from_str(s)
            .map_err(|e| StackError::invalid_argument(format!("parse compose options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read and parse options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> StackResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read compose options '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Reject mode/parameter combinations that cannot be composed.
    pub fn validate(&self) -> StackResult<()> {
        match self.mode {
            ComposeMode::Long if self.group_size == 0 => Err(StackError::invalid_argument(
                "long mode requires group_size >= 1",
            )),
            ComposeMode::Single | ComposeMode::Grid2x2 | ComposeMode::Grid3x3
                if self.aspect_ratio.is_some() =>
            {
                Err(StackError::invalid_argument(format!(
                    "aspect_ratio only applies to long mode, not {}",
                    self.mode
                )))
            }
            _ => Ok(()),
        }
    }

    /// Resolve the composer and group size for these options.
    ///
    /// Returns `None` when nothing is merged: `single` mode, or `long` mode with one page per
    /// group.
    pub fn plan(&self) -> StackResult<Option<ComposePlan>> {
        self.validate()?;
        let plan = match self.mode {
            ComposeMode::Single => None,
            ComposeMode::Grid2x2 | ComposeMode::Grid3x3 => {
                let columns = self.mode.grid_columns().unwrap_or(1);
                Some(ComposePlan {
                    mode: self.mode,
                    group_size: (columns * columns) as usize,
                    composer: Composer::Grid(GridLayoutSpec::new(
                        columns,
                        self.spacing,
                        self.background,
                    )?),
                })
            }
            ComposeMode::Long if self.group_size <= 1 => None,
            ComposeMode::Long => Some(ComposePlan {
                mode: self.mode,
                group_size: self.group_size,
                composer: Composer::Strip(
                    StripLayoutSpec::new(self.spacing, self.background)
                        .with_aspect_ratio(self.aspect_ratio),
                ),
            }),
        };
        Ok(plan)
    }
}

/// A layout strategy with its validated configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composer {
    /// Grid mosaic.
    Grid(GridLayoutSpec),
    /// Vertical strip.
    Strip(StripLayoutSpec),
}

impl Composer {
    /// Compose one group.
    pub fn compose(&self, group: &[RasterImage]) -> StackResult<RasterImage> {
        match self {
            Self::Grid(spec) => compose_grid(group, spec),
            Self::Strip(spec) => compose_strip(group, spec),
        }
    }
}

/// Resolved batch plan: how many pages per group and how to compose each group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComposePlan {
    /// Mode the plan was resolved from.
    pub mode: ComposeMode,
    /// Pages per group.
    pub group_size: usize,
    /// Composer applied to every group.
    pub composer: Composer,
}

impl ComposePlan {
    /// File name for the `index`-th (1-based) composite.
    pub fn file_name(&self, index: usize) -> String {
        format!("{}-{index}.png", self.mode.file_stem())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/opts.rs"]
mod tests;
