//! Panel reconstruction for one page.
//!
//! A `Page` holds the validated inputs of one image: its size, the assumed
//! background, the detected outlines and segments. `Page::analyze` runs the
//! phases of `layout::analysis` in order and produces a `PageLayout`.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::geometry::{Polygon, Segment, SegmentIndex};
use crate::layout::analysis::{
    actual_gutters, deoverlap_panels, exclude_small_panels, expand_panels, group_small_panels,
    merge_panels, order_panels, sort_panels, split_panels,
};
use crate::layout::elements::Panel;
use crate::layout::params::{Background, PageParams, ReadingDirection};
use crate::layout::types::Gutters;
use crate::utils::{Point, Xywh};

/// Read-only page data shared by every phase.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub width: u32,
    pub height: u32,
    pub params: PageParams,
    pub segments: SegmentIndex,
}

impl PageContext {
    pub fn new(width: u32, height: u32, params: PageParams, segments: SegmentIndex) -> Self {
        Self {
            width,
            height,
            params,
            segments,
        }
    }

    /// Width below which a panel is small, scaled by `multiplier`.
    pub fn min_width(&self, multiplier: f64) -> f64 {
        f64::from(self.width) * self.params.min_panel_size_ratio * multiplier
    }

    /// Height below which a panel is small, scaled by `multiplier`.
    pub fn min_height(&self, multiplier: f64) -> f64 {
        f64::from(self.height) * self.params.min_panel_size_ratio * multiplier
    }

    /// A panel covering the whole page.
    pub fn full_page(&self) -> Panel {
        let w = i32::try_from(self.width).unwrap_or(i32::MAX);
        let h = i32::try_from(self.height).unwrap_or(i32::MAX);
        Panel::from_rect((0, 0, w, h))
    }
}

/// Snapshot of the panel set after one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStep {
    pub name: String,
    pub panels: Vec<Xywh>,
}

/// Result of analysing one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page size as [width, height].
    pub size: [u32; 2],
    pub background: Background,
    pub numbering: ReadingDirection,
    /// Gutters measured before expansion.
    pub gutters: Gutters,
    /// Panels in reading order, as [x, y, width, height].
    pub panels: Vec<Xywh>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<PipelineStep>,
}

impl PageLayout {
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }
}

struct StepRecorder {
    enabled: bool,
    steps: Vec<PipelineStep>,
}

impl StepRecorder {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            steps: Vec::new(),
        }
    }

    fn record(&mut self, name: &str, panels: &[Panel]) {
        tracing::debug!(phase = name, panels = panels.len(), "pipeline step");
        if self.enabled {
            self.steps.push(PipelineStep {
                name: name.to_string(),
                panels: panels.iter().map(Panel::to_xywh).collect(),
            });
        }
    }
}

/// One page's validated inputs.
#[derive(Debug, Clone)]
pub struct Page {
    ctx: PageContext,
    background: Background,
    polygons: Vec<Vec<Point>>,
}

impl Page {
    /// Validates the configuration and builds the page.
    ///
    /// Fails on an empty page size or invalid parameters. Malformed polygons
    /// are not an error here: they are skipped during analysis.
    pub fn new(
        width: u32,
        height: u32,
        params: PageParams,
        background: Background,
        polygons: Vec<Vec<Point>>,
        segments: Vec<Segment>,
    ) -> Result<Self> {
        if width == 0 || height == 0 || i32::try_from(width.max(height)).is_err() {
            return Err(LayoutError::InvalidPageSize { width, height });
        }
        params.validate()?;
        Ok(Self {
            ctx: PageContext::new(width, height, params, SegmentIndex::new(segments)),
            background,
            polygons,
        })
    }

    pub fn context(&self) -> &PageContext {
        &self.ctx
    }

    pub fn background(&self) -> Background {
        self.background
    }

    /// One panel per outline, dropping degenerate and very small ones.
    pub fn initial_panels(&self) -> Vec<Panel> {
        self.polygons
            .iter()
            .filter_map(|points| match Polygon::new(points.clone()) {
                Ok(polygon) => Some(Panel::from_polygon(polygon)),
                Err(err) => {
                    tracing::trace!(%err, "skipping outline");
                    None
                }
            })
            .filter(|p| !p.is_very_small(&self.ctx))
            .collect()
    }

    /// Runs the whole pipeline.
    pub fn analyze(&self) -> PageLayout {
        let ctx = &self.ctx;
        let mut recorder = StepRecorder::new(ctx.params.trace);

        let panels = self.initial_panels();
        recorder.record("Initial panels", &panels);

        let panels = group_small_panels(panels, ctx);
        recorder.record("Group small panels", &panels);

        let panels = split_panels(panels, ctx);
        recorder.record("Split panels", &panels);

        let panels = merge_panels(panels);
        recorder.record("Merge panels", &panels);

        let panels = exclude_small_panels(panels, ctx);
        recorder.record("Exclude small panels", &panels);

        let panels = deoverlap_panels(panels);
        recorder.record("Deoverlap panels", &panels);

        let panels = exclude_small_panels(panels, ctx);
        recorder.record("Exclude small panels", &panels);

        let panels = sort_panels(panels, ctx.params.reading_direction);
        let gutters = actual_gutters(&panels);
        let panels = expand_panels(panels, gutters);
        recorder.record("Expand panels", &panels);

        let panels = if panels.is_empty() {
            tracing::debug!("no panel left, using the whole page");
            vec![ctx.full_page()]
        } else {
            panels
        };

        let panels = order_panels(panels, &ctx.params);
        recorder.record("Numbering fixed", &panels);

        PageLayout {
            size: [ctx.width, ctx.height],
            background: self.background,
            numbering: ctx.params.reading_direction,
            gutters,
            panels: panels.iter().map(Panel::to_xywh).collect(),
            steps: recorder.steps,
        }
    }
}
