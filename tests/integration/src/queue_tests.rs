//! Queue Tests - file names, job submission and abort
//!
//! These tests exercise:
//! - Out strings sized by an in-only parameter
//! - Structures with deferred string members
//! - Nonzero statuses returned alongside decoded values

mod common;

use common::*;
use faxobs::messages::{GetQueueFileNameRequest, JobIdRequest, SendDocumentRequest};
use faxobs::operations::{GetQueueFileName, Operation, SendDocument};
use faxobs::{ClientError, FaxObsClient, JobParam, Loopback, NdrContext, Status, SystemTime, Transport};
use faxobs_ndr::{decode_response, encode_request, FrameMessage};

fn queue_request(size: u32) -> GetQueueFileNameRequest {
    GetQueueFileNameRequest {
        file_name: None,
        file_name_size: size,
    }
}

#[test]
fn test_queue_file_name_uses_requested_capacity() {
    init_logging();

    let ctx = NdrContext::new();
    let loopback = Loopback::new(FaxService::new());

    let request = encode_request(&ctx, GetQueueFileName::SCHEMA, &queue_request(255).to_values()).unwrap();
    // null FileName marker, FileNameSize
    assert_eq!(request.len(), 8);
    assert_eq!(&request[0..4], &[0, 0, 0, 0]);

    let call = faxobs::CallInfo {
        opnum: GetQueueFileName::SCHEMA.opnum,
        name: GetQueueFileName::SCHEMA.name,
    };
    let reply = loopback.invoke(&call, request).unwrap();

    // marker, 64-bit capacity, 255 UTF-16 units, status
    assert_eq!(reply.len(), 4 + 8 + 255 * 2 + 4);
    assert_eq!(&reply[4..12], &255u64.to_le_bytes());

    let (mut values, status) = decode_response(&ctx, GetQueueFileName::SCHEMA, &reply).unwrap();
    assert_eq!(status, 0);
    let name = values.take("FileName").unwrap();
    assert_eq!(
        name,
        faxobs_ndr::Value::Text("C:\\Windows\\Spool\\Fax\\Queue\\00000001.tif".into())
    );
}

#[test]
fn test_queue_file_name_truncated_to_capacity() {
    init_logging();

    let client = loopback_client();
    let reply = client.get_queue_file_name(&queue_request(10)).unwrap();
    assert_eq!(reply.status, Status::SUCCESS);
    assert_eq!(reply.response.file_name.as_deref(), Some("C:\\Windows"));
}

#[test]
fn test_send_document_round_trip() {
    init_logging();

    let client = loopback_client();
    let file_name = client
        .get_queue_file_name(&queue_request(255))
        .unwrap()
        .check(GetQueueFileName::SCHEMA.name)
        .unwrap()
        .file_name;

    let params = JobParam {
        size_of_struct: 0x88,
        recipient_number: Some("+1 (425) 555-0100".into()),
        recipient_name: Some("Accounts Payable".into()),
        sender_name: Some("Büro Zürich".into()),
        schedule_time: SystemTime {
            year: 2026,
            month: 10,
            day: 19,
            hour: 22,
            ..Default::default()
        },
        document_name: Some(String::new()),
        ..Default::default()
    };
    let request = SendDocumentRequest {
        file_name: file_name.clone(),
        job_params: params.clone(),
    };

    let job_id = client
        .send_document(&request)
        .unwrap()
        .check(SendDocument::SCHEMA.name)
        .unwrap()
        .job_id;
    assert_eq!(job_id, 1);

    let state = client.transport().server().state.lock().unwrap();
    let job = &state.jobs[0];
    assert_eq!(Some(job.file_name.clone()), file_name);
    assert_eq!(job.params, params);
    // Empty and absent strings stay distinct
    assert_eq!(job.params.document_name.as_deref(), Some(""));
    assert_eq!(job.params.tsid, None);
}

#[test]
fn test_send_without_file_name_is_rejected() {
    init_logging();

    let client = loopback_client();
    let reply = client.send_document(&SendDocumentRequest::default()).unwrap();
    assert_eq!(reply.status, Status::INVALID_PARAMETER);
    assert_eq!(reply.response.job_id, 0);

    let err = reply.check(SendDocument::SCHEMA.name).unwrap_err();
    assert!(matches!(err, ClientError::Status { status: Status::INVALID_PARAMETER, .. }));
    assert_eq!(
        err.to_string(),
        "/faxobs/v4/FaxObs_SendDocument returned ERROR_INVALID_PARAMETER (0x00000057)"
    );
}

#[test]
fn test_abort() {
    init_logging();

    let client = FaxObsClient::new(Loopback::new(FaxService::new()));
    let request = SendDocumentRequest {
        file_name: Some("C:\\fax.tif".into()),
        ..Default::default()
    };
    let job_id = client.send_document(&request).unwrap().response.job_id;

    assert_eq!(client.abort(&JobIdRequest { job_id: 99 }).unwrap().status, Status::INVALID_PARAMETER);
    assert_eq!(client.abort(&JobIdRequest { job_id }).unwrap().status, Status::SUCCESS);
    assert!(client.transport().server().state.lock().unwrap().jobs.is_empty());
}
