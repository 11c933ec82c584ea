//! Content stream interpreter for ruling lines.
//!
//! Walks decoded content stream operators, tracking the graphics state
//! (`q`/`Q`/`cm`) and path construction (`m l c v y re h`). Every painted
//! path contributes its straight segments as [`Edge`]s in top-left page
//! space. Handles Form XObject recursion via the `Do` operator.

use lopdf::content::{Content, Operation};
use pdfscan_core::{Ctm, Edge, EdgeSource, Point, edge_from_segment};

use crate::error::BackendError;
use crate::lopdf_backend::object_to_f64;
use crate::page_geometry::PageGeometry;

/// Maximum nesting of Form XObjects followed by `Do`.
pub const MAX_FORM_DEPTH: usize = 10;

/// A segment of the current path, already in user space after the CTM.
#[derive(Debug, Clone, Copy)]
struct Segment {
    start: Point,
    end: Point,
    source: EdgeSource,
}

/// Path under construction between a paint operator and the next.
#[derive(Debug, Default)]
struct PathBuilder {
    segments: Vec<Segment>,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

impl PathBuilder {
    fn move_to(&mut self, p: Point) {
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    fn push_to(&mut self, end: Point, source: EdgeSource) {
        // Operators without a current point are ignored, as viewers do
        if let Some(start) = self.current {
            self.segments.push(Segment { start, end, source });
        }
        self.current = Some(end);
    }

    fn rect(&mut self, corners: [Point; 4]) {
        for i in 0..4 {
            self.segments.push(Segment {
                start: corners[i],
                end: corners[(i + 1) % 4],
                source: EdgeSource::Rect,
            });
        }
        self.move_to(corners[0]);
    }

    fn close(&mut self) {
        if let (Some(current), Some(start)) = (self.current, self.subpath_start) {
            if current != start {
                self.segments.push(Segment {
                    start: current,
                    end: start,
                    source: EdgeSource::Line,
                });
            }
            self.current = Some(start);
        }
    }

    fn take(&mut self) -> Vec<Segment> {
        self.current = None;
        self.subpath_start = None;
        std::mem::take(&mut self.segments)
    }
}

/// Collects ruling edges from a page and the Form XObjects it draws.
pub(crate) struct EdgeInterpreter<'a> {
    doc: &'a lopdf::Document,
    geometry: &'a PageGeometry,
    edges: Vec<Edge>,
}

impl<'a> EdgeInterpreter<'a> {
    pub(crate) fn new(doc: &'a lopdf::Document, geometry: &'a PageGeometry) -> Self {
        Self {
            doc,
            geometry,
            edges: Vec::new(),
        }
    }

    pub(crate) fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    /// Interpret one content stream.
    ///
    /// `ctm` is the transformation in effect when the stream starts; it is
    /// the identity for the page itself and the parent's CTM combined with
    /// `/Matrix` for a Form XObject.
    pub(crate) fn run(
        &mut self,
        operations: &[Operation],
        resources: Option<&lopdf::Dictionary>,
        ctm: Ctm,
        depth: usize,
    ) -> Result<(), BackendError> {
        if depth > MAX_FORM_DEPTH {
            return Err(BackendError::Interpreter(format!(
                "Form XObject recursion depth {depth} exceeds limit {MAX_FORM_DEPTH}"
            )));
        }

        let mut ctm = ctm;
        let mut stack: Vec<Ctm> = Vec::new();
        let mut path = PathBuilder::default();

        for op in operations {
            let nums = numbers(&op.operands);
            match op.operator.as_str() {
                "q" => stack.push(ctm),
                "Q" => {
                    if let Some(saved) = stack.pop() {
                        ctm = saved;
                    }
                }
                "cm" => {
                    if let [a, b, c, d, e, f] = nums[..] {
                        ctm = Ctm::new(a, b, c, d, e, f).concat(&ctm);
                    }
                }
                "m" => {
                    if let [x, y] = nums[..] {
                        path.move_to(ctm.transform_point(Point::new(x, y)));
                    }
                }
                "l" => {
                    if let [x, y] = nums[..] {
                        path.push_to(ctm.transform_point(Point::new(x, y)), EdgeSource::Line);
                    }
                }
                "c" => {
                    if let [_, _, _, _, x, y] = nums[..] {
                        path.push_to(ctm.transform_point(Point::new(x, y)), EdgeSource::Curve);
                    }
                }
                "v" | "y" => {
                    if let [_, _, x, y] = nums[..] {
                        path.push_to(ctm.transform_point(Point::new(x, y)), EdgeSource::Curve);
                    }
                }
                "re" => {
                    if let [x, y, w, h] = nums[..] {
                        path.rect([
                            ctm.transform_point(Point::new(x, y)),
                            ctm.transform_point(Point::new(x + w, y)),
                            ctm.transform_point(Point::new(x + w, y + h)),
                            ctm.transform_point(Point::new(x, y + h)),
                        ]);
                    }
                }
                "h" => path.close(),
                "S" | "f" | "F" | "f*" | "B" | "B*" => self.paint(&mut path),
                "s" | "b" | "b*" => {
                    path.close();
                    self.paint(&mut path);
                }
                "n" => {
                    path.take();
                }
                "Do" => {
                    let Some(name) = op.operands.first().and_then(|o| o.as_name().ok()) else {
                        continue;
                    };
                    if let Some(resources) = resources {
                        self.do_xobject(resources, name, ctm, depth)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn paint(&mut self, path: &mut PathBuilder) {
        for seg in path.take() {
            let start = self.geometry.normalize_point(seg.start);
            let end = self.geometry.normalize_point(seg.end);
            self.edges.push(edge_from_segment(start, end, seg.source));
        }
    }

    fn do_xobject(
        &mut self,
        resources: &lopdf::Dictionary,
        name: &[u8],
        ctm: Ctm,
        depth: usize,
    ) -> Result<(), BackendError> {
        let Some(xobjects) = resources
            .get(b"XObject")
            .ok()
            .and_then(|o| resolve_dict(self.doc, o))
        else {
            tracing::debug!(
                name = %String::from_utf8_lossy(name),
                "Do without an /XObject resource dictionary"
            );
            return Ok(());
        };
        let Some(stream) = xobjects
            .get(name)
            .ok()
            .and_then(|o| self.doc.dereference(o).ok())
            .and_then(|(_, o)| o.as_stream().ok())
        else {
            return Ok(());
        };

        let is_form = stream
            .dict
            .get(b"Subtype")
            .and_then(|o| o.as_name())
            .is_ok_and(|s| s == b"Form");
        if !is_form {
            return Ok(());
        }

        let matrix = stream
            .dict
            .get(b"Matrix")
            .and_then(|o| o.as_array())
            .ok()
            .and_then(|arr| {
                let vals: Vec<f64> = arr.iter().filter_map(|o| object_to_f64(o).ok()).collect();
                match vals[..] {
                    [a, b, c, d, e, f] => Some(Ctm::new(a, b, c, d, e, f)),
                    _ => None,
                }
            })
            .unwrap_or_default();

        // Forms without their own /Resources draw with the parent's
        let form_resources = stream
            .dict
            .get(b"Resources")
            .ok()
            .and_then(|o| resolve_dict(self.doc, o))
            .or(Some(resources));

        let bytes = if stream.dict.has(b"Filter") {
            stream.decompressed_content().map_err(|e| {
                BackendError::Interpreter(format!(
                    "failed to decode Form XObject /{}: {e}",
                    String::from_utf8_lossy(name)
                ))
            })?
        } else {
            stream.content.clone()
        };
        let content = Content::decode(&bytes).map_err(|e| {
            BackendError::Interpreter(format!(
                "failed to parse Form XObject /{}: {e}",
                String::from_utf8_lossy(name)
            ))
        })?;

        self.run(
            &content.operations,
            form_resources,
            matrix.concat(&ctm),
            depth + 1,
        )
    }
}

/// Numeric operands of an operator; non-numbers are dropped so that a
/// malformed operator fails every arity pattern and is skipped.
fn numbers(operands: &[lopdf::Object]) -> Vec<f64> {
    let nums: Vec<f64> = operands
        .iter()
        .filter_map(|o| object_to_f64(o).ok())
        .collect();
    if nums.len() == operands.len() {
        nums
    } else {
        Vec::new()
    }
}

/// Resolve an object (possibly an indirect reference) to a dictionary.
pub(crate) fn resolve_dict<'a>(
    doc: &'a lopdf::Document,
    obj: &'a lopdf::Object,
) -> Option<&'a lopdf::Dictionary> {
    doc.dereference(obj).ok().and_then(|(_, o)| o.as_dict().ok())
}
