use crate::ui::html_escape;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub labels: Vec<String>,
    pub dataset_label: String,
    pub data: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ChartHandle(u64);

/// Something that can draw a bar chart and must be told when a drawing is
/// no longer needed.
pub trait ChartSurface {
    fn create(&mut self, spec: &ChartSpec) -> ChartHandle;
    fn destroy(&mut self, handle: ChartHandle);
    fn live_count(&self) -> usize;
}

/// Holds at most one live chart on a surface.
#[derive(Debug, Default)]
pub struct KeywordChart<S> {
    surface: S,
    current: Option<ChartHandle>,
}

impl<S: ChartSurface> KeywordChart<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            current: None,
        }
    }

    /// Destroys the previous chart before drawing the new one.
    pub fn replace(&mut self, spec: &ChartSpec) -> ChartHandle {
        if let Some(previous) = self.current.take() {
            self.surface.destroy(previous);
        }
        let handle = self.surface.create(spec);
        self.current = Some(handle);
        handle
    }

    pub fn current(&self) -> Option<ChartHandle> {
        self.current
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// Draws charts as inline SVG bar charts.
#[derive(Debug, Default)]
pub struct SvgSurface {
    next_id: u64,
    live: BTreeMap<ChartHandle, String>,
}

impl SvgSurface {
    pub fn svg(&self, handle: ChartHandle) -> Option<&str> {
        self.live.get(&handle).map(String::as_str)
    }
}

impl ChartSurface for SvgSurface {
    fn create(&mut self, spec: &ChartSpec) -> ChartHandle {
        self.next_id += 1;
        let handle = ChartHandle(self.next_id);
        self.live.insert(handle, render_bar_chart(spec));
        debug!("created keyword chart {}", handle.0);
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if self.live.remove(&handle).is_some() {
            debug!("destroyed keyword chart {}", handle.0);
        }
    }

    fn live_count(&self) -> usize {
        self.live.len()
    }
}

pub fn render_bar_chart(spec: &ChartSpec) -> String {
    const WIDTH: f64 = 600.0;
    const HEIGHT: f64 = 260.0;
    const PADDING_X: f64 = 44.0;
    const PADDING_Y: f64 = 54.0;
    const TOP: f64 = 20.0;

    if spec.data.is_empty() {
        return format!(
            r#"<svg viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="{}"><text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text></svg>"#,
            html_escape(&spec.dataset_label)
        );
    }

    let max = spec.data.iter().copied().max().unwrap_or(0).max(1) as f64;
    let slot = (WIDTH - PADDING_X * 2.0) / spec.data.len() as f64;
    let bar_width = slot * 0.6;
    let scale = (HEIGHT - TOP - PADDING_Y) / max;
    let baseline = HEIGHT - PADDING_Y;

    let mut body = String::new();
    body.push_str(&format!(
        r#"<line class="chart-axis" x1="{PADDING_X}" y1="{baseline}" x2="{}" y2="{baseline}" />"#,
        WIDTH - PADDING_X
    ));
    for (position, (label, value)) in spec.labels.iter().zip(&spec.data).enumerate() {
        let height = *value as f64 * scale;
        let x = PADDING_X + position as f64 * slot + (slot - bar_width) / 2.0;
        let center = x + bar_width / 2.0;
        body.push_str(&format!(
            r#"<rect class="chart-bar" x="{x:.2}" y="{:.2}" width="{bar_width:.2}" height="{height:.2}"><title>{}: {value}</title></rect>"#,
            baseline - height,
            html_escape(label)
        ));
        body.push_str(&format!(
            r#"<text class="chart-label" x="{center:.2}" y="{:.2}" text-anchor="end" transform="rotate(-30 {center:.2} {:.2})">{}</text>"#,
            baseline + 16.0,
            baseline + 16.0,
            html_escape(label)
        ));
    }

    format!(
        r#"<svg viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="{}">{body}</svg>"#,
        html_escape(&spec.dataset_label)
    )
}
