//! High-level analysis API.
//!
//! Provides the main entry points:
//! - `analyze_page()` - Analyse one page, trying each background assumption
//! - `analyze_pages()` - Analyse independent pages on a worker pool
//! - `process_pages()` - The worker pool itself, for callers wrapping each page

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::geometry::Segment;
use crate::layout::{Background, Page, PageLayout, PageParams};
use crate::utils::Point;

pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Outlines detected under one background assumption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeSet {
    pub background: Background,
    #[serde(default)]
    pub polygons: Vec<Vec<Point>>,
}

/// Everything the vision frontend extracted from one page image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInput {
    /// Page size as [width, height].
    pub size: [u32; 2],
    /// Outline sets, tried in order until one yields several panels.
    #[serde(default)]
    pub shapes: Vec<ShapeSet>,
    /// Detected straight lines.
    #[serde(default)]
    pub segments: Vec<[Point; 2]>,
}

impl PageInput {
    pub fn segments(&self) -> Vec<Segment> {
        self.segments
            .iter()
            .map(|[a, b]| Segment::from_points(*a, *b))
            .collect()
    }
}

/// Options for page analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzeOptions {
    /// Page analysis parameters.
    pub params: PageParams,

    /// Worker threads for `analyze_pages`. None uses available parallelism.
    pub threads: Option<usize>,
}

/// Analyses one page.
///
/// Each shape set is tried in order; the first layout with more than one
/// panel wins, otherwise the last layout computed is returned. A page without
/// shape sets is analysed once as an empty light page.
pub fn analyze_page(input: &PageInput, options: &AnalyzeOptions) -> Result<PageLayout> {
    let [width, height] = input.size;
    let segments = input.segments();
    let fallback = [ShapeSet::default()];
    let shapes = if input.shapes.is_empty() {
        &fallback[..]
    } else {
        &input.shapes[..]
    };

    let mut layout = None;
    for set in shapes {
        let page = Page::new(
            width,
            height,
            options.params.clone(),
            set.background,
            set.polygons.clone(),
            segments.clone(),
        )?;
        let result = page.analyze();
        tracing::debug!(
            background = %set.background,
            panels = result.panel_count(),
            "analysed background assumption"
        );
        if result.panel_count() > 1 {
            return Ok(result);
        }
        layout = Some(result);
    }

    layout.ok_or_else(|| LayoutError::DegenerateGeometry("no shape set analysed".to_string()))
}

/// Analyses independent pages in parallel, returning results in input order.
///
/// Only the worker pool can fail as a whole; each page reports its own
/// configuration errors.
pub fn analyze_pages(
    inputs: &[PageInput],
    options: &AnalyzeOptions,
) -> Result<Vec<Result<PageLayout>>> {
    process_pages(inputs, options.threads, |input| analyze_page(input, options))
}

/// Runs `process` on every item on a worker pool of `threads` threads
/// (available parallelism when None). Outputs keep the input order.
pub fn process_pages<T, R, F>(items: &[T], threads: Option<usize>, process: F) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let thread_count = threads.unwrap_or_else(default_thread_count).max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|e| LayoutError::ThreadPool(e.to_string()))?;

    let mut results: Vec<(usize, R)> = pool.install(|| {
        items
            .par_iter()
            .enumerate()
            .map(|(idx, item)| (idx, process(item)))
            .collect()
    });

    results.sort_by_key(|(idx, _)| *idx);
    Ok(results.into_iter().map(|(_, result)| result).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_without_shapes_gets_full_panel() {
        let input = PageInput {
            size: [300, 200],
            ..PageInput::default()
        };
        let layout = analyze_page(&input, &AnalyzeOptions::default()).unwrap();
        assert_eq!(layout.panels, vec![[0, 0, 300, 200]]);
        assert_eq!(layout.background, Background::Light);
    }

    #[test]
    fn process_pages_keeps_input_order() {
        let items: Vec<u32> = (0..32).collect();
        let doubled = process_pages(&items, Some(4), |n| n * 2).unwrap();
        assert_eq!(doubled, (0..32).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn invalid_size_is_reported() {
        let input = PageInput {
            size: [0, 200],
            ..PageInput::default()
        };
        assert!(matches!(
            analyze_page(&input, &AnalyzeOptions::default()),
            Err(LayoutError::InvalidPageSize { .. })
        ));
    }
}
