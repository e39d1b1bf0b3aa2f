//! FaxObs Loopback Demo
//!
//! Connects to an in-process fax server, reserves a queue file, submits a
//! job and disconnects, printing every request and response frame.
//!
//! USAGE:
//!   faxobs-loopback [OPTIONS]
//!
//! EXAMPLES:
//!   faxobs-loopback                       # Default call sequence
//!   faxobs-loopback --file-name-size 16   # Truncated queue file name
//!   faxobs-loopback --big-endian -v       # Big-endian frames, debug logging

use std::sync::Mutex;

use bytes::Bytes;
use clap::Parser;
use faxobs::messages::*;
use faxobs::{
    CallInfo, ContextHandle, FaxObsClient, FaxObsServer, JobParam, Loopback, NdrContext, Outcome, Reply, SizeWidth,
    Status, Transport, TransportError, Uuid,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "faxobs-loopback")]
#[command(version)]
#[command(about = "FaxObs loopback demo - marshals a call sequence and dumps the frames")]
struct Args {
    /// Value sent as ConnectionRefCount's Connect argument
    #[arg(long, default_value_t = 1)]
    connect: u32,

    /// Capacity requested for the queue file name
    #[arg(long, default_value_t = 255)]
    file_name_size: u32,

    /// Recipient number for the submitted job
    #[arg(long, default_value = "+1 425 555 0100")]
    recipient: String,

    /// Use big-endian frames
    #[arg(long)]
    big_endian: bool,

    /// Use 32-bit array size prefixes
    #[arg(long)]
    narrow_sizes: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Skip the frame dumps
    #[arg(short, long)]
    quiet: bool,
}

/// Minimal fax server
#[derive(Default)]
struct DemoServer {
    next_job: Mutex<u32>,
}

impl FaxObsServer for DemoServer {
    fn connection_ref_count(&self, request: ConnectionRefCountRequest) -> Outcome<ConnectionRefCountResponse> {
        info!(
            "Server: ConnectionRefCount connect={}, handle={}",
            request.connect, request.handle
        );
        let handle = match request.connect {
            1 => ContextHandle::new(0, Uuid::new(0x0000_0001, 0xfa, 0x0b, [0x5e; 8])),
            _ => ContextHandle::EMPTY,
        };
        Ok(Reply::ok(ConnectionRefCountResponse { handle, can_share: 0 }))
    }

    fn get_queue_file_name(&self, _request: GetQueueFileNameRequest) -> Outcome<GetQueueFileNameResponse> {
        Ok(Reply::ok(GetQueueFileNameResponse {
            file_name: Some("C:\\Windows\\Spool\\Fax\\Queue\\00000001.tif".into()),
        }))
    }

    fn send_document(&self, request: SendDocumentRequest) -> Outcome<SendDocumentResponse> {
        if request.file_name.is_none() {
            return Ok(Reply::with_status(SendDocumentResponse::default(), Status::INVALID_PARAMETER));
        }
        let mut next = self.next_job.lock().map_err(|_| faxobs::ServerError::Fault(Status::INVALID_FUNCTION.0))?;
        *next += 1;
        info!(
            "Server: queued job {} for {:?}",
            *next, request.job_params.recipient_number
        );
        Ok(Reply::ok(SendDocumentResponse { job_id: *next }))
    }
}

/// Transport that prints each frame it carries
struct Dump<T> {
    inner: T,
    quiet: bool,
}

impl<T: Transport> Transport for Dump<T> {
    fn invoke(&self, call: &CallInfo, request: Bytes) -> Result<Bytes, TransportError> {
        if !self.quiet {
            println!("--> opnum {} {}", call.opnum, call.name);
            print_hex(&request);
        }
        let response = self.inner.invoke(call, request)?;
        if !self.quiet {
            println!("<-- {} bytes", response.len());
            print_hex(&response);
        }
        Ok(response)
    }
}

fn print_hex(data: &[u8]) {
    for (i, chunk) in data.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        println!("    {:04x}  {}", i * 16, hex.join(" "));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut ctx = NdrContext::new().with_byte_order(!args.big_endian);
    if args.narrow_sizes {
        ctx = ctx.with_size_width(SizeWidth::U32);
    }

    let transport = Dump {
        inner: Loopback::with_context(DemoServer::default(), ctx),
        quiet: args.quiet,
    };
    let client = FaxObsClient::with_context(transport, ctx);

    let reply = client.connection_ref_count(&ConnectionRefCountRequest {
        handle: ContextHandle::EMPTY,
        connect: args.connect,
    })?;
    info!(
        "Connected: handle={}, can_share={}, status={}",
        reply.response.handle, reply.response.can_share, reply.status
    );
    let handle = reply.response.handle;

    let queue = client.get_queue_file_name(&GetQueueFileNameRequest {
        file_name: None,
        file_name_size: args.file_name_size,
    })?;
    info!("Queue file: {:?}, status={}", queue.response.file_name, queue.status);

    let job = client.send_document(&SendDocumentRequest {
        file_name: queue.response.file_name,
        job_params: JobParam {
            size_of_struct: 0x88,
            recipient_number: Some(args.recipient),
            document_name: Some("loopback".into()),
            ..Default::default()
        },
    })?;
    info!("Submitted: job_id={}, status={}", job.response.job_id, job.status);

    let released = client.disconnect(handle)?;
    info!("Disconnected: handle={}", released);

    let stats = client.transport().inner.stats().snapshot();
    info!(
        "Calls: received={}, processed={}, failed={}, bytes in={}, bytes out={}",
        stats.requests_received, stats.requests_processed, stats.requests_failed, stats.bytes_received, stats.bytes_sent
    );
    Ok(())
}
