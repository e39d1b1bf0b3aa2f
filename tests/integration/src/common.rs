//! Shared fixtures for FaxObs integration tests
//!
//! `FaxService` is a small in-memory fax server: it issues connection
//! handles, reserves queue file names, accepts jobs and stores the settings
//! it is sent. Tests drive it through `FaxObsClient` over a `Loopback`.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use faxobs::messages::*;
use faxobs::{
    Configuration, ContextHandle, FaxObsClient, FaxObsServer, GlobalRoutingInfo, JobParam, Loopback, Outcome, Reply,
    Status, Uuid,
};

/// Version reported by `GetVersion`
pub const SERVICE_VERSION: u32 = 0x0004_0000;

/// Initialize test logging
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A queued job
#[derive(Debug, Clone)]
pub struct QueuedJob {
    pub job_id: u32,
    pub file_name: String,
    pub params: JobParam,
}

#[derive(Debug, Default)]
pub struct ServiceState {
    pub connections: u32,
    pub next_handle: u32,
    pub next_file: u32,
    pub next_job: u32,
    pub connect_requests: Vec<ConnectionRefCountRequest>,
    pub jobs: Vec<QueuedJob>,
    pub tapi_locations: Vec<u8>,
    pub configuration: Option<Configuration>,
    pub routing: Vec<GlobalRoutingInfo>,
    pub client_servers: Vec<StartClientServerRequest>,
}

/// In-memory fax server
#[derive(Debug, Default)]
pub struct FaxService {
    pub state: Mutex<ServiceState>,
}

impl FaxService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tapi_locations(data: &[u8]) -> Self {
        let service = Self::default();
        service.state.lock().unwrap().tapi_locations = data.to_vec();
        service
    }
}

/// Copy `data` out through a caller-sized buffer
fn fill_buffer(data: &[u8], offered: u32) -> Reply<Buffer> {
    let needed = data.len() as u32;
    if offered < needed {
        return Reply::with_status(
            Buffer {
                buffer: None,
                buffer_size: needed,
            },
            Status::INSUFFICIENT_BUFFER,
        );
    }
    Reply::ok(Buffer {
        buffer: Some(data.to_vec()),
        buffer_size: needed,
    })
}

impl FaxObsServer for FaxService {
    fn connection_ref_count(&self, request: ConnectionRefCountRequest) -> Outcome<ConnectionRefCountResponse> {
        let mut state = self.state.lock().unwrap();
        state.connect_requests.push(request.clone());

        let handle = match request.connect {
            1 => {
                state.connections += 1;
                state.next_handle += 1;
                ContextHandle::new(0, Uuid::new(state.next_handle, 0x4834, 0x11d2, [0xfa; 8]))
            }
            0 => {
                state.connections = state.connections.saturating_sub(1);
                ContextHandle::EMPTY
            }
            _ => {
                return Ok(Reply::with_status(
                    ConnectionRefCountResponse::default(),
                    Status::INVALID_PARAMETER,
                ))
            }
        };

        Ok(Reply::ok(ConnectionRefCountResponse { handle, can_share: 0 }))
    }

    fn get_version(&self, _request: Empty) -> Outcome<GetVersionResponse> {
        Ok(Reply::ok(GetVersionResponse {
            version: SERVICE_VERSION,
        }))
    }

    fn get_queue_file_name(&self, _request: GetQueueFileNameRequest) -> Outcome<GetQueueFileNameResponse> {
        let mut state = self.state.lock().unwrap();
        state.next_file += 1;
        let name = format!("C:\\Windows\\Spool\\Fax\\Queue\\{:08X}.tif", state.next_file);
        Ok(Reply::ok(GetQueueFileNameResponse { file_name: Some(name) }))
    }

    fn send_document(&self, request: SendDocumentRequest) -> Outcome<SendDocumentResponse> {
        let file_name = match request.file_name {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Ok(Reply::with_status(
                    SendDocumentResponse::default(),
                    Status::INVALID_PARAMETER,
                ))
            }
        };

        let mut state = self.state.lock().unwrap();
        state.next_job += 1;
        let job_id = state.next_job;
        state.jobs.push(QueuedJob {
            job_id,
            file_name,
            params: request.job_params,
        });
        Ok(Reply::ok(SendDocumentResponse { job_id }))
    }

    fn abort(&self, request: JobIdRequest) -> Outcome<Empty> {
        let mut state = self.state.lock().unwrap();
        let before = state.jobs.len();
        state.jobs.retain(|job| job.job_id != request.job_id);
        if state.jobs.len() == before {
            return Ok(Reply::with_status(Empty {}, Status::INVALID_PARAMETER));
        }
        Ok(Reply::ok(Empty {}))
    }

    fn get_tapi_locations(&self, request: Buffer) -> Outcome<Buffer> {
        let state = self.state.lock().unwrap();
        Ok(fill_buffer(&state.tapi_locations, request.buffer_size))
    }

    fn set_tapi_locations(&self, request: Buffer) -> Outcome<Empty> {
        let mut state = self.state.lock().unwrap();
        state.tapi_locations = request.buffer.unwrap_or_default();
        Ok(Reply::ok(Empty {}))
    }

    fn set_configuration(&self, request: SetConfigurationRequest) -> Outcome<Empty> {
        self.state.lock().unwrap().configuration = Some(request.config);
        Ok(Reply::ok(Empty {}))
    }

    fn set_global_routing_info(&self, request: SetGlobalRoutingInfoRequest) -> Outcome<Empty> {
        self.state.lock().unwrap().routing.push(request.routing_info);
        Ok(Reply::ok(Empty {}))
    }

    fn start_client_server(&self, request: StartClientServerRequest) -> Outcome<Empty> {
        self.state.lock().unwrap().client_servers.push(request);
        Ok(Reply::ok(Empty {}))
    }

    fn get_security_descriptor_count(&self, _request: Empty) -> Outcome<GetSecurityDescriptorCountResponse> {
        Ok(Reply::ok(GetSecurityDescriptorCountResponse { count: 1 }))
    }

    fn access_check(&self, request: AccessCheckRequest) -> Outcome<AccessCheckResponse> {
        Ok(Reply::ok(AccessCheckResponse {
            access: request.access_mask & 0x0001 != 0,
        }))
    }
}

/// Client wired straight to a fresh service
pub fn loopback_client() -> FaxObsClient<Loopback<FaxService>> {
    FaxObsClient::new(Loopback::new(FaxService::new()))
}

/// Test result for reporting
#[derive(Debug, Clone)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub duration: Duration,
    pub message: Option<String>,
}

/// Aggregated results of a test run
#[derive(Debug, Default)]
pub struct TestSuiteResults {
    pub results: Vec<TestResult>,
}

impl TestSuiteResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: TestResult) {
        self.results.push(result);
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(60));
        println!("FaxObs integration tests");
        println!("{}", "=".repeat(60));
        for result in &self.results {
            let mark = if result.passed { "PASS" } else { "FAIL" };
            println!("[{}] {} ({:.2?})", mark, result.name, result.duration);
            if let Some(message) = &result.message {
                println!("       {}", message);
            }
        }
        println!("{}", "-".repeat(60));
        println!("{} passed, {} failed", self.passed(), self.failed());
    }
}
