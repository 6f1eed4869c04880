use crate::config::SEGMENT_SPACING;
use crate::input::{Heading, heading_change_is_valid};

/// Position in world coordinates: origin at the centre, y grows upward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns this point moved `distance` units along `heading`.
    #[must_use]
    pub fn stepped(self, heading: Heading, distance: f64) -> Self {
        let (dx, dy) = heading.unit();
        Self {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }
}

/// Head position, heading and the trailing body segments.
#[derive(Debug, Clone)]
pub struct Creature {
    head: Point,
    heading: Heading,
    segments: Vec<Point>,
}

impl Creature {
    /// Creates a bare head at `head`, without any segment.
    #[must_use]
    pub fn new(head: Point, heading: Heading) -> Self {
        Self {
            head,
            heading,
            segments: Vec::new(),
        }
    }

    /// Creates a creature from an explicit head and body (front follows the head).
    #[must_use]
    pub fn from_segments(head: Point, heading: Heading, segments: Vec<Point>) -> Self {
        Self {
            head,
            heading,
            segments,
        }
    }

    /// Creates a creature at `head` carrying `length` seeded segments.
    #[must_use]
    pub fn spawn(head: Point, heading: Heading, length: usize) -> Self {
        let mut creature = Self::new(head, heading);
        for _ in 0..length {
            creature.grow();
        }
        creature
    }

    /// Changes the heading used by the next advance.
    ///
    /// A direct reversal of the current heading is ignored.
    pub fn set_heading(&mut self, heading: Heading) {
        if heading_change_is_valid(self.heading, heading) {
            self.heading = heading;
        }
    }

    /// Shifts every segment onto the one ahead of it, then moves the head.
    pub fn advance(&mut self, step: f64) {
        for index in (1..self.segments.len()).rev() {
            self.segments[index] = self.segments[index - 1];
        }

        if let Some(first) = self.segments.first_mut() {
            *first = self.head;
        }

        self.head = self.head.stepped(self.heading, step);
    }

    /// Appends one trailing segment.
    ///
    /// The new segment sits on the current tail, or one spacing behind the
    /// head when the body is still empty.
    pub fn grow(&mut self) {
        let position = match self.segments.last() {
            Some(tail) => *tail,
            None => self.head.stepped(self.heading.opposite(), SEGMENT_SPACING),
        };
        self.segments.push(position);
    }

    /// Removes every segment.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Returns true when any segment lies closer than `threshold` to the head.
    #[must_use]
    pub fn head_touches_body(&self, threshold: f64) -> bool {
        self.segments
            .iter()
            .any(|segment| self.head.distance(*segment) < threshold)
    }

    #[must_use]
    pub fn head(&self) -> Point {
        self.head
    }

    #[must_use]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Iterates over body segments from the head towards the tail.
    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.segments.iter()
    }

    /// Returns the number of trailing segments (the head is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Heading;

    use super::{Creature, Point};

    #[test]
    fn reversal_leaves_heading_unchanged() {
        for heading in Heading::ALL {
            let mut creature = Creature::spawn(Point::ORIGIN, heading, 2);

            creature.set_heading(heading.opposite());

            assert_eq!(creature.heading(), heading);
        }
    }

    #[test]
    fn perpendicular_turn_is_accepted() {
        let mut creature = Creature::new(Point::ORIGIN, Heading::Right);

        creature.set_heading(Heading::Up);

        assert_eq!(creature.heading(), Heading::Up);
    }

    #[test]
    fn initial_growth_seeds_behind_the_head() {
        let right = Creature::spawn(Point::ORIGIN, Heading::Right, 2);
        let up = Creature::spawn(Point::new(5.0, 5.0), Heading::Up, 1);
        let left = Creature::spawn(Point::ORIGIN, Heading::Left, 1);
        let down = Creature::spawn(Point::ORIGIN, Heading::Down, 1);

        let body: Vec<Point> = right.segments().copied().collect();
        assert_eq!(body, vec![Point::new(-20.0, 0.0), Point::new(-20.0, 0.0)]);
        assert_eq!(up.segments().next(), Some(&Point::new(5.0, -15.0)));
        assert_eq!(left.segments().next(), Some(&Point::new(20.0, 0.0)));
        assert_eq!(down.segments().next(), Some(&Point::new(0.0, 20.0)));
    }

    #[test]
    fn advance_moves_head_and_follows_the_leader() {
        let mut creature = Creature::from_segments(
            Point::new(0.0, 0.0),
            Heading::Right,
            vec![
                Point::new(-20.0, 0.0),
                Point::new(-40.0, 0.0),
                Point::new(-60.0, 0.0),
            ],
        );

        creature.advance(20.0);

        assert_eq!(creature.head(), Point::new(20.0, 0.0));
        let body: Vec<Point> = creature.segments().copied().collect();
        assert_eq!(
            body,
            vec![
                Point::new(0.0, 0.0),
                Point::new(-20.0, 0.0),
                Point::new(-40.0, 0.0),
            ]
        );
    }

    #[test]
    fn advance_keeps_segment_count() {
        let mut creature = Creature::spawn(Point::ORIGIN, Heading::Right, 2);

        for _ in 0..10 {
            creature.advance(15.0);
            assert_eq!(creature.len(), 2);
        }
    }

    #[test]
    fn growth_appends_on_the_tail() {
        let mut creature = Creature::from_segments(
            Point::ORIGIN,
            Heading::Up,
            vec![Point::new(0.0, -20.0), Point::new(0.0, -40.0)],
        );

        creature.grow();

        assert_eq!(creature.len(), 3);
        assert_eq!(creature.segments().last(), Some(&Point::new(0.0, -40.0)));
    }

    #[test]
    fn head_touching_segment_is_detected_below_threshold() {
        let creature = Creature::from_segments(
            Point::ORIGIN,
            Heading::Left,
            vec![Point::new(9.0, 0.0), Point::new(40.0, 0.0)],
        );
        let apart = Creature::from_segments(
            Point::ORIGIN,
            Heading::Left,
            vec![Point::new(10.0, 0.0)],
        );

        assert!(creature.head_touches_body(10.0));
        assert!(!apart.head_touches_body(10.0));
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
