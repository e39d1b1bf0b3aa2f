//! Settings Tests - configuration and routing structures
//!
//! These tests exercise:
//! - BOOL members and nested FAX_TIME structures
//! - Multiple deferred strings inside one structure
//! - Big-endian frames on both ends

mod common;

use common::*;
use faxobs::messages::{AccessCheckRequest, SetConfigurationRequest, SetGlobalRoutingInfoRequest};
use faxobs::{Configuration, FaxObsClient, GlobalRoutingInfo, Loopback, NdrContext, Status, Time};

fn configuration() -> Configuration {
    Configuration {
        size_of_struct: 56,
        retries: 3,
        retry_delay: 10,
        dirty_days: 30,
        branding: true,
        use_device_tsid: false,
        server_cp: true,
        pause_server_queue: false,
        start_cheap_time: Time { hour: 20, minute: 30 },
        stop_cheap_time: Time { hour: 6, minute: 0 },
        archive_outgoing_faxes: true,
        archive_directory: Some("D:\\Archive\\Sent".into()),
        profile_name: None,
    }
}

#[test]
fn test_set_configuration() {
    init_logging();

    let client = loopback_client();
    let config = configuration();
    let reply = client
        .set_configuration(&SetConfigurationRequest { config: config.clone() })
        .unwrap();
    assert_eq!(reply.status, Status::SUCCESS);

    let state = client.transport().server().state.lock().unwrap();
    assert_eq!(state.configuration.as_ref(), Some(&config));
}

#[test]
fn test_global_routing_info() {
    init_logging();

    let client = loopback_client();
    let info = GlobalRoutingInfo {
        size_of_struct: 28,
        priority: 1,
        guid: Some("{6bbf7bfe-9af2-11d0-abf7-00c04fd91a4e}".into()),
        friendly_name: Some("Route through e-mail".into()),
        function_name: Some("RouteToInbox".into()),
        extension_image_name: None,
        extension_friendly_name: Some(String::new()),
    };
    client
        .set_global_routing_info(&SetGlobalRoutingInfoRequest {
            routing_info: info.clone(),
        })
        .unwrap()
        .check("SetGlobalRoutingInfo")
        .unwrap();

    assert_eq!(client.transport().server().state.lock().unwrap().routing, vec![info]);
}

#[test]
fn test_access_check_bool() {
    init_logging();

    let client = loopback_client();
    let granted = client.access_check(&AccessCheckRequest { access_mask: 0x0001 }).unwrap();
    let denied = client.access_check(&AccessCheckRequest { access_mask: 0x0010 }).unwrap();
    assert!(granted.response.access);
    assert!(!denied.response.access);
}

#[test]
fn test_big_endian_end_to_end() {
    init_logging();

    let ctx = NdrContext::big_endian();
    let client = FaxObsClient::with_context(Loopback::with_context(FaxService::new(), ctx), ctx);

    let handle = client.connect().unwrap();
    assert!(!handle.is_empty());

    let config = configuration();
    client
        .set_configuration(&SetConfigurationRequest { config: config.clone() })
        .unwrap()
        .check("SetConfiguration")
        .unwrap();
    assert_eq!(
        client.transport().server().state.lock().unwrap().configuration,
        Some(config)
    );
}
