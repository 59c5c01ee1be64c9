//! Navigation providers for hosts without a navmesh

use glam::Vec3;
use strider_core::math::flatten;
use strider_core::NavigationProvider;

/// Heads straight for the target
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectPath;

impl NavigationProvider for DirectPath {
    fn next_waypoint(&mut self, _from: Vec3, target: Vec3) -> Vec3 {
        target
    }
}

/// Walks a fixed list of waypoints in order, then heads for the target
#[derive(Debug, Clone)]
pub struct WaypointPath {
    waypoints: Vec<Vec3>,
    next: usize,
    /// Horizontal distance at which a waypoint counts as reached
    pub arrival_radius: f32,
}

impl WaypointPath {
    pub fn new(waypoints: Vec<Vec3>, arrival_radius: f32) -> Self {
        Self {
            waypoints,
            next: 0,
            arrival_radius,
        }
    }

    /// Waypoints not yet reached
    pub fn remaining(&self) -> &[Vec3] {
        &self.waypoints[self.next..]
    }

    /// Start the path over from the first waypoint
    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl NavigationProvider for WaypointPath {
    fn next_waypoint(&mut self, from: Vec3, target: Vec3) -> Vec3 {
        while let Some(waypoint) = self.waypoints.get(self.next) {
            if flatten(*waypoint - from).length() > self.arrival_radius {
                return *waypoint;
            }
            self.next += 1;
        }
        target
    }
}
