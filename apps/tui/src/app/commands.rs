use crate::api::{ApiError, PredictionApi, Road, RoadPrediction, RoadRequest};
use crate::app::submit::Ticket;
use crate::selection::ExpertRequest;

/// Network work queued by the app for the event loop to run.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchRoads { ticket: Ticket },
    PredictRoad { ticket: Ticket, request: RoadRequest },
    ExpertPredict { ticket: Ticket, request: ExpertRequest },
}

/// Outcome of a `Command`, carrying the ticket it was issued with.
#[derive(Debug)]
pub enum Reply {
    Roads {
        ticket: Ticket,
        outcome: Result<Vec<Road>, ApiError>,
    },
    RoadPrediction {
        ticket: Ticket,
        outcome: Result<RoadPrediction, ApiError>,
    },
    Expert {
        ticket: Ticket,
        outcome: Result<serde_json::Value, ApiError>,
    },
}

pub async fn execute<A: PredictionApi>(api: &A, command: Command) -> Reply {
    match command {
        Command::FetchRoads { ticket } => Reply::Roads {
            ticket,
            outcome: api.fetch_roads().await,
        },
        Command::PredictRoad { ticket, request } => Reply::RoadPrediction {
            ticket,
            outcome: api.predict_road(&request).await,
        },
        Command::ExpertPredict { ticket, request } => Reply::Expert {
            ticket,
            outcome: api.expert_predict(&request).await,
        },
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::models::{Congestion, Predictions, WireText};
    use crate::domain::LatLng;
    use crate::variant::Variant;
    use std::sync::Mutex;

    /// Canned responses plus a log of the bodies it was sent.
    #[derive(Debug, Default)]
    pub(crate) struct FakeApi {
        pub expert_reply: Mutex<Option<Result<serde_json::Value, ApiError>>>,
        pub sent: Mutex<Vec<serde_json::Value>>,
    }

    impl FakeApi {
        pub(crate) fn answering(reply: Result<serde_json::Value, ApiError>) -> Self {
            Self {
                expert_reply: Mutex::new(Some(reply)),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn sent(&self) -> Vec<serde_json::Value> {
            self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
        }
    }

    impl PredictionApi for FakeApi {
        async fn fetch_roads(&self) -> Result<Vec<Road>, ApiError> {
            Ok(vec![Road {
                id: WireText::Text("r1".to_string()),
                name: "MG Road".to_string(),
            }])
        }

        async fn predict_road(&self, _request: &RoadRequest) -> Result<RoadPrediction, ApiError> {
            Ok(RoadPrediction {
                predictions: Predictions {
                    congestion: Congestion {
                        label: "Light".to_string(),
                        level: 0.2,
                    },
                    avg_speed: 40.0,
                    predicted_volume: None,
                },
                alternative_route: None,
            })
        }

        async fn expert_predict(&self, request: &ExpertRequest) -> Result<serde_json::Value, ApiError> {
            if let (Ok(mut sent), Ok(body)) = (self.sent.lock(), serde_json::to_value(request)) {
                sent.push(body);
            }
            self.expert_reply
                .lock()
                .ok()
                .and_then(|mut reply| reply.take())
                .unwrap_or(Err(ApiError::Status(500)))
        }
    }

    #[tokio::test]
    async fn test_replies_keep_their_ticket() {
        let api = FakeApi::default();
        let request = ExpertRequest {
            model: Variant::Kmeans,
            coordinates: LatLng::new(12.95, 77.55),
            prediction_time: None,
            event: None,
            selected_date: None,
        };

        let reply = execute(&api, Command::ExpertPredict { ticket: 42, request }).await;

        assert!(matches!(
            reply,
            Reply::Expert {
                ticket: 42,
                outcome: Err(ApiError::Status(500))
            }
        ));
        assert_eq!(
            api.sent(),
            vec![serde_json::json!({"model": "kmeans", "coordinates": {"lat": 12.95, "lng": 77.55}})]
        );
    }

    #[tokio::test]
    async fn test_road_list_is_forwarded() {
        let reply = execute(&FakeApi::default(), Command::FetchRoads { ticket: 1 }).await;
        let Reply::Roads { outcome: Ok(roads), .. } = reply else {
            panic!("expected roads");
        };
        assert_eq!(roads[0].name, "MG Road");
    }
}
