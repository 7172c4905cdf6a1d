/// A position in either design space or display space. Callers keep track of
/// which space a point belongs to; nothing here converts implicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn offset_by(self, dx: f32, dy: f32) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner. Containment is
/// inclusive on every edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width * 0.5,
            y: self.y + self.height * 0.5,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Shrinks or grows the rectangle about its own center.
    pub fn scaled_about_center(&self, factor: f32) -> Rect {
        let width = self.width * factor;
        let height = self.height * factor;
        Rect {
            x: self.x + (self.width - width) * 0.5,
            y: self.y + (self.height - height) * 0.5,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    fn from_points(points: &[Point]) -> Option<Bounds> {
        let first = points.first()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for point in &points[1..] {
            bounds.min_x = bounds.min_x.min(point.x);
            bounds.min_y = bounds.min_y.min(point.y);
            bounds.max_x = bounds.max_x.max(point.x);
            bounds.max_y = bounds.max_y.max(point.y);
        }
        Some(bounds)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }

    pub fn to_rect(self) -> Rect {
        Rect {
            x: self.min_x,
            y: self.min_y,
            width: self.max_x - self.min_x,
            height: self.max_y - self.min_y,
        }
    }
}

/// Per-axis factors mapping design space onto display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale {
    pub x: f32,
    pub y: f32,
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl DisplayScale {
    pub const IDENTITY: DisplayScale = DisplayScale { x: 1.0, y: 1.0 };

    /// Returns `None` when either size has a zero or non-finite extent.
    pub fn between(reference: (f32, f32), display: (f32, f32)) -> Option<DisplayScale> {
        let (reference_width, reference_height) = reference;
        let (display_width, display_height) = display;
        let all_positive = [reference_width, reference_height, display_width, display_height]
            .iter()
            .all(|value| value.is_finite() && *value > 0.0);
        if !all_positive {
            return None;
        }
        Some(DisplayScale {
            x: display_width / reference_width,
            y: display_height / reference_height,
        })
    }

    /// Radius factor. Circles stay circles under non-uniform axis scaling.
    pub fn uniform(self) -> f32 {
        self.x.min(self.y)
    }

    pub fn apply(self, point: Point) -> Point {
        Point {
            x: point.x * self.x,
            y: point.y * self.y,
        }
    }

    pub fn apply_rect(self, rect: Rect) -> Rect {
        Rect {
            x: rect.x * self.x,
            y: rect.y * self.y,
            width: rect.width * self.x,
            height: rect.height * self.y,
        }
    }
}

pub fn point_in_circle(point: Point, center: Point, radius: f32) -> bool {
    if !(radius > 0.0) {
        return false;
    }
    point.distance_sq(center) <= radius * radius
}

/// Even-odd ray casting over the closed vertex loop.
///
/// An edge only counts when `min(y1, y2) < y <= max(y1, y2)`, so a scanline
/// through a shared vertex toggles once. Horizontal edges are skipped
/// outright; they can never cross the scanline in that half-open band.
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    let count = vertices.len();
    if count < 3 {
        return false;
    }

    let mut inside = false;
    for index in 0..count {
        let a = vertices[index];
        let b = vertices[(index + 1) % count];
        if a.y == b.y {
            continue;
        }
        if point.y <= a.y.min(b.y) || point.y > a.y.max(b.y) {
            continue;
        }
        if point.x > a.x.max(b.x) {
            continue;
        }
        if a.x == b.x {
            inside = !inside;
            continue;
        }
        let x_intersection = (point.y - a.y) * (b.x - a.x) / (b.y - a.y) + a.x;
        if point.x <= x_intersection {
            inside = !inside;
        }
    }
    inside
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { center: Point, radius: f32 },
    Polygon { vertices: Vec<Point> },
}

impl Shape {
    /// Degenerate shapes (non-positive radius, fewer than three vertices)
    /// never contain any point.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Shape::Circle { radius, .. } => !(*radius > 0.0),
            Shape::Polygon { vertices } => vertices.len() < 3,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        if self.is_degenerate() {
            return None;
        }
        match self {
            Shape::Circle { center, radius } => Some(Bounds {
                min_x: center.x - radius,
                min_y: center.y - radius,
                max_x: center.x + radius,
                max_y: center.y + radius,
            }),
            Shape::Polygon { vertices } => Bounds::from_points(vertices),
        }
    }

    /// Precise containment test, without the bounding-box pre-filter.
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Shape::Circle { center, radius } => point_in_circle(point, *center, *radius),
            Shape::Polygon { vertices } => point_in_polygon(point, vertices),
        }
    }

    pub fn rescaled(&self, scale: DisplayScale) -> Shape {
        match self {
            Shape::Circle { center, radius } => Shape::Circle {
                center: scale.apply(*center),
                radius: radius * scale.uniform(),
            },
            Shape::Polygon { vertices } => Shape::Polygon {
                vertices: vertices.iter().map(|vertex| scale.apply(*vertex)).collect(),
            },
        }
    }
}

/// A hit region authored in design space together with its current display
/// space copy and the cached bounds of that copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    design: Shape,
    display: Shape,
    bounds: Option<Bounds>,
}

impl Hotspot {
    pub fn new(design: Shape) -> Self {
        let bounds = design.bounds();
        Self {
            display: design.clone(),
            design,
            bounds,
        }
    }

    pub fn circle(center: Point, radius: f32) -> Self {
        Self::new(Shape::Circle { center, radius })
    }

    pub fn polygon(vertices: Vec<Point>) -> Self {
        Self::new(Shape::Polygon { vertices })
    }

    pub fn design(&self) -> &Shape {
        &self.design
    }

    pub fn display(&self) -> &Shape {
        &self.display
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn rescale(&mut self, scale: DisplayScale) {
        self.display = self.design.rescaled(scale);
        self.bounds = self.display.bounds();
    }

    /// `point` must be in display space.
    pub fn contains(&self, point: Point) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if !bounds.contains(point) {
            return false;
        }
        self.display.contains(point)
    }
}
