//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier the game client assigns to every unit and structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag(pub u64);

/// Driver step counter (one per controller invocation)
pub type Iteration = u64;

/// Playable race of the controlled side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Protoss,
    Terran,
    Zerg,
}

impl Race {
    pub const ALL: [Race; 3] = [Race::Protoss, Race::Terran, Race::Zerg];

    /// Case-insensitive parse; `None` for anything that is not a playable race
    pub fn parse(name: &str) -> Option<Race> {
        match name.trim().to_ascii_lowercase().as_str() {
            "protoss" => Some(Race::Protoss),
            "terran" => Some(Race::Terran),
            "zerg" => Some(Race::Zerg),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Race::Protoss => "Protoss",
            Race::Terran => "Terran",
            Race::Zerg => "Zerg",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 2D map position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point `fraction` of the way from `self` to `other`
    pub fn lerp(&self, other: &Self, fraction: f32) -> Self {
        *self + (*other - *self) * fraction
    }

    /// Arithmetic mean of a set of points, `None` when empty
    pub fn centroid<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2>,
    {
        let mut sum = Point2::default();
        let mut count = 0usize;
        for p in points {
            sum = sum + p;
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(sum * (1.0 / count as f32))
        }
    }
}

impl std::ops::Add for Point2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Point2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Point2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_parse_is_case_insensitive() {
        assert_eq!(Race::parse("protoss"), Some(Race::Protoss));
        assert_eq!(Race::parse(" TERRAN "), Some(Race::Terran));
        assert_eq!(Race::parse("Zerg"), Some(Race::Zerg));
        assert_eq!(Race::parse("Random"), None);
        assert_eq!(Race::parse(""), None);
    }

    #[test]
    fn test_point_distance() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_lerp_two_thirds() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(30.0, 60.0);
        let p = a.lerp(&b, 2.0 / 3.0);
        assert!((p.x - 20.0).abs() < 1e-4);
        assert!((p.y - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_centroid() {
        assert_eq!(Point2::centroid(Vec::new()), None);
        let c = Point2::centroid(vec![Point2::new(0.0, 0.0), Point2::new(4.0, 2.0)]).unwrap();
        assert_eq!(c, Point2::new(2.0, 1.0));
    }
}
