use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StubMode {
	#[default]
	Healthy,
	/// Every call answers 503.
	Down,
	/// Every call answers 400 with a gateway error body.
	Rejecting,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
	pub authorization: Option<String>,
	pub body:          Value,
}

#[derive(Clone, Default)]
pub struct StubGatewayState {
	pub mode:     Arc<Mutex<StubMode>>,
	pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
	pub sessions: Arc<Mutex<HashMap<String, Value>>>,
	pub lookups:  Arc<Mutex<Vec<String>>>,
}

impl StubGatewayState {
	pub fn set_mode(&self, mode: StubMode) {
		*self.mode.lock().unwrap() = mode;
	}

	pub fn put_session(&self, session: Value) {
		let id = session["id"].as_str().unwrap().to_string();
		self.sessions.lock().unwrap().insert(id, session);
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().unwrap().clone()
	}

	pub fn lookups(&self) -> Vec<String> {
		self.lookups.lock().unwrap().clone()
	}

	fn mode(&self) -> StubMode {
		*self.mode.lock().unwrap()
	}
}

pub struct StubGateway {
	pub url:   String,
	pub state: StubGatewayState,
}

/// Starts a hosted-checkout gateway double on a random local port.
pub async fn start_stub_gateway() -> StubGateway {
	let state = StubGatewayState::default();
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let port = listener.local_addr().unwrap().port();

	let app_state = state.clone();
	let server = HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(app_state.clone()))
			.route("/v1/checkout/sessions", web::post().to(create_session))
			.route("/v1/checkout/sessions/{id}", web::get().to(get_session))
	})
	.workers(1)
	.listen(listener)
	.unwrap()
	.run();
	tokio::spawn(server);

	StubGateway {
		url: format!("http://127.0.0.1:{port}"),
		state,
	}
}

async fn create_session(
	req: HttpRequest,
	body: web::Json<Value>,
	state: web::Data<StubGatewayState>,
) -> HttpResponse {
	let authorization = req
		.headers()
		.get("Authorization")
		.and_then(|v| v.to_str().ok())
		.map(str::to_string);
	let body = body.into_inner();

	let mut requests = state.requests.lock().unwrap();
	requests.push(RecordedRequest {
		authorization,
		body: body.clone(),
	});

	match state.mode() {
		StubMode::Down => HttpResponse::ServiceUnavailable().finish(),
		StubMode::Rejecting => rejection(),
		StubMode::Healthy => {
			let id = format!("cs_stub_{}", requests.len());
			let session = json!({
				"id": id,
				"url": format!("https://pay.example.com/c/{id}"),
				"status": "open",
				"payment_status": "unpaid",
				"amount_total": body["amount"],
				"currency": body["currency"],
			});
			state
				.sessions
				.lock()
				.unwrap()
				.insert(id.clone(), session.clone());
			HttpResponse::Ok().json(session)
		}
	}
}

async fn get_session(
	id: web::Path<String>,
	state: web::Data<StubGatewayState>,
) -> HttpResponse {
	state.lookups.lock().unwrap().push(id.to_string());

	match state.mode() {
		StubMode::Down => HttpResponse::ServiceUnavailable().finish(),
		StubMode::Rejecting => rejection(),
		StubMode::Healthy => match state.sessions.lock().unwrap().get(id.as_str()) {
			Some(session) => HttpResponse::Ok().json(session),
			None => HttpResponse::NotFound().json(json!({
				"error": { "message": format!("No such checkout session: {id}") }
			})),
		},
	}
}

fn rejection() -> HttpResponse {
	HttpResponse::BadRequest().json(json!({
		"error": { "message": "Invalid currency: xyz" }
	}))
}
