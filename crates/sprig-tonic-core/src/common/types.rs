//! Domain logic shared by the server and client binaries.
//!
//! This module centralizes the two pieces of behavior both ends of the wire
//! must agree on:
//!
//! - [`Displacement::distance`]: the Euclidean distance computation behind
//!   the unary `ComputeDisplacement` call.
//! - [`status_reports`]: the canonical, ordered sequence of status reports
//!   emitted by the server-streaming feed and sent by the streaming client
//!   stub. It is defined exactly once so the two call sites cannot drift.

use crate::proto::{Data, Displacement, Point, Status};

/// Number of reports in the canned [`status_reports`] sequence.
pub const STATUS_REPORT_COUNT: usize = 5;

/// Returns the canonical status report sequence, in emission order.
///
/// Every `FetchStatus` call replays this exact sequence from the start; the
/// client's `StreamState` run sends the same sequence upstream.
pub fn status_reports() -> [Data; STATUS_REPORT_COUNT] {
    [
        Data::report(Status::Unknown, "no record...."),
        Data::report(Status::Starved, "Too long without food."),
        Data::report(Status::Thirsty, "Requires watering."),
        Data::report(Status::Tired, "Shutting down for the night."),
        Data::report(Status::Ok, "OK."),
    ]
}

impl Data {
    /// Builds a report from a closed [`Status`] variant and a free-form note.
    pub fn report(status: Status, info: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            info: info.into(),
        }
    }
}

impl Displacement {
    /// Euclidean distance between `start` and `end`.
    ///
    /// Coordinates are widened to `f64` before subtracting, so the full
    /// `i32` range is accepted without overflow. A missing point decodes as
    /// the proto3 default, the origin.
    pub fn distance(&self) -> f64 {
        let (sx, sy) = coords(self.start.as_ref());
        let (ex, ey) = coords(self.end.as_ref());
        let dx = ex - sx;
        let dy = ey - sy;
        (dx * dx + dy * dy).sqrt()
    }
}

fn coords(point: Option<&Point>) -> (f64, f64) {
    point.map_or((0.0, 0.0), |p| (f64::from(p.x), f64::from(p.y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn displacement(start: (i32, i32), end: (i32, i32)) -> Displacement {
        Displacement {
            start: Some(Point {
                x: start.0,
                y: start.1,
            }),
            end: Some(Point { x: end.0, y: end.1 }),
        }
    }

    #[test]
    fn distance_matches_known_value() {
        // sqrt(12^2 + 2^2) = sqrt(148)
        let d = displacement((0, 12), (12, 14)).distance();
        assert!((d - 148.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn distance_is_exactly_zero_for_identical_points() {
        let d = displacement((7, -3), (7, -3)).distance();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn distance_handles_negative_coordinates() {
        let d = displacement((-3, -4), (0, 0)).distance();
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn distance_does_not_overflow_on_i32_extremes() {
        let d = displacement((i32::MIN, i32::MIN), (i32::MAX, i32::MAX)).distance();
        let span = f64::from(i32::MAX) - f64::from(i32::MIN);
        assert!((d - (2.0 * span * span).sqrt()).abs() < 1.0);
    }

    #[test]
    fn missing_points_decode_as_origin() {
        let empty = Displacement {
            start: None,
            end: None,
        };
        assert_eq!(empty.distance(), 0.0);

        let half = Displacement {
            start: None,
            end: Some(Point { x: 3, y: 4 }),
        };
        assert!((half.distance() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn report_sequence_is_fixed_and_ordered() {
        let reports = status_reports();
        let expected = [
            (Status::Unknown, "no record...."),
            (Status::Starved, "Too long without food."),
            (Status::Thirsty, "Requires watering."),
            (Status::Tired, "Shutting down for the night."),
            (Status::Ok, "OK."),
        ];

        assert_eq!(reports.len(), STATUS_REPORT_COUNT);
        for (report, (status, info)) in reports.iter().zip(expected) {
            assert_eq!(report.status(), status);
            assert_eq!(report.info, info);
        }

        // A second evaluation must reproduce the same sequence.
        assert_eq!(status_reports(), reports);
    }
}
