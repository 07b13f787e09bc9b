//! # SVG plotting surface
//!
//! [`SvgSurface`] is the built-in [`Surface`] backend. It buffers every
//! polyline it is handed and only touches its writer inside
//! [`show`](`Surface::show`), where it emits one standalone SVG document
//! sized to the bounding box of the figure. A render that fails partway
//! therefore never leaves a partial document behind.
//!
//! The y axis is flipped inside the document so the figure reads like a
//! plot, with y increasing upward.

use crate::prelude::*;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::writer::Writer;

/// device width of the emitted document, in pixels
const TARGET_WIDTH: f64 = 800.0;
/// padding around the figure bounding box, as a fraction of its larger span
const PAD_FRACTION: f64 = 0.05;

/// A [`Surface`] that renders the figure as an SVG document on `show`.
pub struct SvgSurface<W: Write> {
    writer: W,
    polylines: Vec<Vec<Point>>,
}

impl<W: Write> SvgSurface<W> {
    pub fn new(writer: W) -> SvgSurface<W> {
        SvgSurface {
            writer,
            polylines: Vec::new(),
        }
    }

    /// consume the surface, returning the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Surface for SvgSurface<W> {
    fn polyline(&mut self, points: &[Point]) -> Result<(), Error> {
        self.polylines.push(points.to_vec());
        Ok(())
    }

    /// Emit the buffered polylines as one SVG document.
    ///
    /// The buffer is dropped whether or not the write succeeds: a failed
    /// `show` cannot be retried into the same writer, since the document
    /// may already be partially written.
    fn show(&mut self) -> Result<(), Error> {
        let result = self.write_document();
        self.polylines.clear();
        result
    }
}

impl<W: Write> SvgSurface<W> {
    fn write_document(&mut self) -> Result<(), Error> {
        let viewport = Viewport::around(self.polylines.iter().flatten());

        let mut fmt = ryu::Buffer::new();
        let width = fmt.format(TARGET_WIDTH).to_string();
        let height = fmt.format(viewport.device_height()).to_string();
        let view_box = viewport.view_box();
        let transform = viewport.flip_transform();

        let mut writer = Writer::new(&mut self.writer);

        let mut svg = BytesStart::new("svg");
        svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
        svg.push_attribute(("width", width.as_str()));
        svg.push_attribute(("height", height.as_str()));
        svg.push_attribute(("viewBox", view_box.as_str()));
        writer.write_event(Event::Start(svg))?;

        // flip y about the center of the bounding box; the viewBox is
        // symmetric under this map so no re-offset is needed
        let mut group = BytesStart::new("g");
        group.push_attribute(("transform", transform.as_str()));
        group.push_attribute(("fill", "none"));
        group.push_attribute(("stroke", "red"));
        group.push_attribute(("stroke-width", "1"));
        writer.write_event(Event::Start(group))?;

        for polyline in &self.polylines {
            let points = points_attribute(polyline);

            let mut element = BytesStart::new("polyline");
            element.push_attribute(("points", points.as_str()));
            element.push_attribute(("vector-effect", "non-scaling-stroke"));
            writer.write_event(Event::Empty(element))?;
        }

        writer.write_event(Event::End(BytesEnd::new("g")))?;
        writer.write_event(Event::End(BytesEnd::new("svg")))?;

        self.writer.flush()?;

        Ok(())
    }
}

/// the padded bounding box of a figure, in user units
struct Viewport {
    min_x: f64,
    min_y: f64,
    span_x: f64,
    span_y: f64,
    /// `min_y + max_y` of the unpadded box, the fixed line of the y flip
    flip_sum: f64,
}

impl Viewport {
    fn around<'a, I: Iterator<Item = &'a Point>>(points: I) -> Viewport {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);

        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        if !min.x.is_finite() {
            // nothing was drawn, fall back to a unit box at the origin
            min = Point::new(0., 0.);
            max = Point::new(0., 0.);
        }

        let flip_sum = min.y + max.y;

        // a single point or an axis-aligned line still needs a 2D viewport
        let mut span_x = max.x - min.x;
        let mut span_y = max.y - min.y;
        if span_x == 0. {
            span_x = 1.;
            min.x -= 0.5;
        }
        if span_y == 0. {
            span_y = 1.;
            min.y -= 0.5;
        }

        let pad = PAD_FRACTION * span_x.max(span_y);

        Viewport {
            min_x: min.x - pad,
            min_y: min.y - pad,
            span_x: span_x + 2. * pad,
            span_y: span_y + 2. * pad,
            flip_sum,
        }
    }

    fn device_height(&self) -> f64 {
        TARGET_WIDTH * self.span_y / self.span_x
    }

    fn view_box(&self) -> String {
        let mut fmt = ryu::Buffer::new();
        let mut out = String::new();

        for value in [self.min_x, self.min_y, self.span_x, self.span_y] {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(fmt.format(value));
        }

        out
    }

    fn flip_transform(&self) -> String {
        let mut fmt = ryu::Buffer::new();
        format!("matrix(1 0 0 -1 0 {})", fmt.format(self.flip_sum))
    }
}

fn points_attribute(points: &[Point]) -> String {
    let mut fmt = ryu::Buffer::new();
    let mut out = String::new();

    for point in points {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(fmt.format(point.x));
        out.push(',');
        out.push_str(fmt.format(point.y));
    }

    out
}
