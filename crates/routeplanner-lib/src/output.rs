use std::fmt::Write;

use crate::network::{LabelMode, LocationId, RouteNetwork};
use crate::routing::{ParkingOutcome, QueryReport, RouteOutcome, RoutePath};

/// Presentation style for turning a [`QueryReport`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportRenderMode {
    /// `Key:Value` lines, one per result field.
    #[default]
    Protocol,
    /// Short human-readable summary.
    Summary,
}

/// Renders query reports with location labels taken from a network.
#[derive(Debug, Clone, Copy)]
pub struct ReportRenderer<'a> {
    network: &'a RouteNetwork,
    labels: LabelMode,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(network: &'a RouteNetwork, labels: LabelMode) -> Self {
        Self { network, labels }
    }

    /// Render the report using the requested textual mode.
    pub fn render(&self, report: &QueryReport, mode: ReportRenderMode) -> String {
        match mode {
            ReportRenderMode::Protocol => self.render_protocol(report),
            ReportRenderMode::Summary => self.render_summary(report),
        }
    }

    /// Label for a location id; unknown ids fall back to the raw id.
    pub fn label(&self, id: LocationId) -> String {
        self.network
            .location_by_id(id)
            .map(|location| self.labels.label(location))
            .unwrap_or_else(|| id.to_string())
    }

    /// `1,2,3(12)`, or `none` for an empty path.
    pub fn path(&self, path: &RoutePath) -> String {
        if path.is_empty() {
            return "none".to_string();
        }
        let steps = path
            .steps
            .iter()
            .map(|&id| self.label(id))
            .collect::<Vec<_>>()
            .join(",");
        format!("{steps}({})", path.weight)
    }

    fn render_protocol(&self, report: &QueryReport) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "Source:{}", self.label(report.source));
        let _ = writeln!(buffer, "Destination:{}", self.label(report.destination));

        match &report.outcome {
            RouteOutcome::Unrestricted { best, alternative } => {
                let _ = writeln!(buffer, "BestDrivingRoute:{}", self.path(best));
                if let Some(alternative) = alternative {
                    let _ = writeln!(buffer, "AlternativeDrivingRoute:{}", self.path(alternative));
                }
            }
            RouteOutcome::Restricted { route } => {
                let _ = writeln!(buffer, "RestrictedDrivingRoute:{}", self.path(route));
            }
            RouteOutcome::DrivingWalking {
                parking: ParkingOutcome::Found(found),
            } => {
                let _ = writeln!(buffer, "DrivingRoute:{}", self.path(&found.driving));
                let _ = writeln!(buffer, "ParkingNode:{}", self.label(found.parking));
                let _ = writeln!(buffer, "WalkingRoute:{}", self.path(&found.walking));
                let _ = writeln!(buffer, "TotalTime:{}", found.total_time);
            }
            RouteOutcome::DrivingWalking {
                parking: ParkingOutcome::Infeasible { max_walk_time },
            } => {
                buffer.push_str("DrivingRoute:none\n");
                buffer.push_str("ParkingNode:none\n");
                buffer.push_str("WalkingRoute:none\n");
                buffer.push_str("TotalTime:none\n");
                let _ = writeln!(
                    buffer,
                    "Message:No possible route with max. walking time of {max_walk_time} minutes."
                );
            }
        }
        buffer
    }

    fn render_summary(&self, report: &QueryReport) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{} route: {} -> {}",
            report.mode,
            self.label(report.source),
            self.label(report.destination)
        );

        match &report.outcome {
            RouteOutcome::Unrestricted { best, alternative } => {
                let _ = writeln!(buffer, "  best:        {}", self.arrow_path(best));
                if let Some(alternative) = alternative {
                    let _ = writeln!(buffer, "  alternative: {}", self.arrow_path(alternative));
                }
            }
            RouteOutcome::Restricted { route } => {
                let _ = writeln!(buffer, "  restricted:  {}", self.arrow_path(route));
            }
            RouteOutcome::DrivingWalking {
                parking: ParkingOutcome::Found(found),
            } => {
                let _ = writeln!(buffer, "  drive:       {}", self.arrow_path(&found.driving));
                let _ = writeln!(buffer, "  park at:     {}", self.label(found.parking));
                let _ = writeln!(buffer, "  walk:        {}", self.arrow_path(&found.walking));
                let _ = writeln!(buffer, "  total:       {} min", found.total_time);
            }
            RouteOutcome::DrivingWalking {
                parking: ParkingOutcome::Infeasible { max_walk_time },
            } => {
                let _ = writeln!(
                    buffer,
                    "  no parking within {max_walk_time} min walk of the destination"
                );
            }
        }
        buffer
    }

    fn arrow_path(&self, path: &RoutePath) -> String {
        if path.is_empty() {
            return "none".to_string();
        }
        let steps = path
            .steps
            .iter()
            .map(|&id| self.label(id))
            .collect::<Vec<_>>()
            .join(" -> ");
        format!("{steps} ({} min, {} hops)", path.weight, path.hop_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Location, RouteTimes};
    use crate::routing::{ParkingRoute, RouteMode};

    fn network() -> RouteNetwork {
        let mut network = RouteNetwork::new();
        let places = [(1, "ARC", "Arcos"), (2, "BRG", "Braga"), (3, "CMB", "Coimbra")];
        for (id, code, name) in places {
            network.add_location(Location {
                name: name.to_string(),
                id,
                code: code.to_string(),
                can_park: id == 2,
            });
        }
        let times = RouteTimes {
            driving: Some(4.0),
            walking: 10.0,
        };
        network.add_route("ARC", "BRG", times);
        network.add_route("BRG", "CMB", times);
        network
    }

    fn path(steps: &[LocationId], weight: f64) -> RoutePath {
        RoutePath {
            steps: steps.to_vec(),
            weight,
        }
    }

    #[test]
    fn unrestricted_protocol_lines() {
        let network = network();
        let report = QueryReport {
            mode: RouteMode::Driving,
            source: 1,
            destination: 3,
            outcome: RouteOutcome::Unrestricted {
                best: path(&[1, 2, 3], 8.0),
                alternative: Some(RoutePath::none()),
            },
        };
        let renderer = ReportRenderer::new(&network, LabelMode::Id);
        let text = renderer.render(&report, ReportRenderMode::Protocol);
        assert_eq!(
            text,
            "Source:1\nDestination:3\nBestDrivingRoute:1,2,3(8)\nAlternativeDrivingRoute:none\n"
        );
    }

    #[test]
    fn missing_alternative_line_is_omitted() {
        let network = network();
        let report = QueryReport {
            mode: RouteMode::Driving,
            source: 1,
            destination: 3,
            outcome: RouteOutcome::Unrestricted {
                best: RoutePath::none(),
                alternative: None,
            },
        };
        let renderer = ReportRenderer::new(&network, LabelMode::Code);
        let text = renderer.render(&report, ReportRenderMode::Protocol);
        assert_eq!(text, "Source:ARC\nDestination:CMB\nBestDrivingRoute:none\n");
    }

    #[test]
    fn parking_protocol_lines() {
        let network = network();
        let report = QueryReport {
            mode: RouteMode::DrivingWalking,
            source: 1,
            destination: 3,
            outcome: RouteOutcome::DrivingWalking {
                parking: ParkingOutcome::Found(ParkingRoute {
                    parking: 2,
                    driving: path(&[1, 2], 4.0),
                    walking: path(&[2, 3], 10.5),
                    total_time: 14.5,
                }),
            },
        };
        let renderer = ReportRenderer::new(&network, LabelMode::Name);
        let text = renderer.render(&report, ReportRenderMode::Protocol);
        assert_eq!(
            text,
            "Source:Arcos\nDestination:Coimbra\nDrivingRoute:Arcos,Braga(4)\n\
             ParkingNode:Braga\nWalkingRoute:Braga,Coimbra(10.5)\nTotalTime:14.5\n"
        );
    }

    #[test]
    fn infeasible_protocol_echoes_budget() {
        let network = network();
        let report = QueryReport {
            mode: RouteMode::DrivingWalking,
            source: 1,
            destination: 3,
            outcome: RouteOutcome::DrivingWalking {
                parking: ParkingOutcome::Infeasible { max_walk_time: 5.0 },
            },
        };
        let renderer = ReportRenderer::new(&network, LabelMode::Id);
        let text = renderer.render(&report, ReportRenderMode::Protocol);
        assert!(text.contains("TotalTime:none\n"));
        assert!(text.ends_with("Message:No possible route with max. walking time of 5 minutes.\n"));
    }

    #[test]
    fn summary_uses_arrows() {
        let network = network();
        let report = QueryReport {
            mode: RouteMode::Driving,
            source: 1,
            destination: 3,
            outcome: RouteOutcome::Restricted {
                route: path(&[1, 2, 3], 8.0),
            },
        };
        let renderer = ReportRenderer::new(&network, LabelMode::Code);
        let text = renderer.render(&report, ReportRenderMode::Summary);
        assert!(text.starts_with("driving route: ARC -> CMB\n"), "{text}");
        assert!(text.contains("ARC -> BRG -> CMB (8 min, 2 hops)"), "{text}");
    }

    #[test]
    fn unknown_id_falls_back_to_number() {
        let network = network();
        assert_eq!(ReportRenderer::new(&network, LabelMode::Name).label(77), "77");
    }
}
