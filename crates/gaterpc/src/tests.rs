use anyhow::Result;

use gatepack::Response;
use gatepack::Transaction;
use gatepack::gateway::IDENTITY;

use crate::builder::BuildError;
use crate::context::CallContext;
use crate::context::Cancellation;
use crate::dispatcher::Dispatcher;
use crate::handler::Handler;
use crate::handler::handler_fn;
use crate::service::EVALUATE_TRANSACTION;
use crate::service::GATEWAY;
use crate::service::MethodDescriptor;
use crate::service::SUBMIT_TRANSACTION;
use crate::service::ServiceDescriptor;
use crate::status::Code;
use crate::status::Status;

struct Echo;

#[async_trait::async_trait]
impl Handler for Echo {
    async fn handle(&self, _ctx: &CallContext, request: Transaction) -> std::result::Result<Response, Status> {
        Ok(Response::new(request.args.concat()))
    }
}

// ==========================================
// 1. Service Descriptors
// ==========================================

#[test]
fn test_resolve_naming_forms() {
    for ident in [
        "SubmitTransaction",
        "Gateway.SubmitTransaction",
        "gateway.Gateway.SubmitTransaction",
        "/gateway.Gateway/SubmitTransaction",
    ] {
        let method = GATEWAY.resolve(ident);
        assert_eq!(method.map(|m| m.name), Some(SUBMIT_TRANSACTION), "{}", ident);
    }
    assert_eq!(GATEWAY.resolve("EvaluateTransaction").map(|m| m.name), Some(EVALUATE_TRANSACTION));
}

#[test]
fn test_resolve_rejects_foreign_names() {
    assert!(GATEWAY.resolve("Nonexistent").is_none());
    assert!(GATEWAY.resolve("Other.SubmitTransaction").is_none());
    assert!(GATEWAY.resolve("/other.Gateway/SubmitTransaction").is_none());
    assert!(GATEWAY.resolve("submittransaction").is_none());
    assert!(GATEWAY.resolve("").is_none());
}

#[test]
fn test_method_name_formatting() {
    assert_eq!(GATEWAY.qualified(SUBMIT_TRANSACTION), "Gateway.SubmitTransaction");
    assert_eq!(GATEWAY.path(EVALUATE_TRANSACTION), "/gateway.Gateway/EvaluateTransaction");
    assert_eq!(GATEWAY.methods.len(), 2);
    for method in GATEWAY.methods {
        assert_eq!(method.request.name, "gateway.Transaction");
        assert_eq!(method.response.name, "gateway.Response");
    }
}

// ==========================================
// 2. Status
// ==========================================

#[test]
fn test_status_display_and_codes() {
    let status = Status::invalid_argument("bad tag");
    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "bad tag");
    assert_eq!(status.to_string(), "INVALID_ARGUMENT: bad tag");

    assert_eq!(Code::from_u8(12), Some(Code::Unimplemented));
    assert_eq!(Code::from_u8(0), None);
    assert_eq!(Code::from_u8(17), None);
    for b in 1..=16u8 {
        let code = Code::from_u8(b).expect("codes 1..=16 are defined");
        assert_eq!(code as u8, b);
    }
}

// ==========================================
// 3. Cancellation
// ==========================================

#[tokio::test]
async fn test_cancellation_is_shared() {
    let a = Cancellation::new();
    let b = a.clone();
    assert!(!b.is_cancelled());

    let waiter = tokio::spawn(async move { b.cancelled().await });
    tokio::task::yield_now().await;
    a.cancel();
    waiter.await.expect("waiter task");
    assert!(a.is_cancelled());

    // already-cancelled signals resolve immediately
    a.cancelled().await;
}

// ==========================================
// 4. Builder
// ==========================================

#[test]
fn test_builder_rejects_unknown_method() {
    let err = Dispatcher::builder().handler("Nonexistent", Echo).build().err();
    assert_eq!(err, Some(BuildError::UnknownMethod("Nonexistent".into())));
}

#[test]
fn test_builder_rejects_duplicates_across_forms() {
    let err = Dispatcher::builder()
        .handler("SubmitTransaction", Echo)
        .handler("/gateway.Gateway/SubmitTransaction", Echo)
        .build()
        .err();
    assert_eq!(err, Some(BuildError::DuplicateHandler(SUBMIT_TRANSACTION)));
}

static MISMATCHED: ServiceDescriptor = ServiceDescriptor {
    package: "gateway",
    name: "Gateway",
    methods: &[MethodDescriptor { name: "Whoami", request: &IDENTITY, response: &IDENTITY }],
};

#[test]
fn test_builder_rejects_unsupported_signature() {
    let err = crate::builder::DispatcherBuilder::for_service(&MISMATCHED)
        .handler("Whoami", Echo)
        .build()
        .err();
    assert_eq!(err, Some(BuildError::UnsupportedSignature("Whoami")));
}

#[test]
fn test_builder_empty_is_valid() -> Result<()> {
    let dispatcher = Dispatcher::builder().build()?;
    assert!(!dispatcher.serves(SUBMIT_TRANSACTION));
    assert_eq!(dispatcher.service().name, "Gateway");
    Ok(())
}

// ==========================================
// 5. Dispatch
// ==========================================

#[tokio::test]
async fn test_dispatch_unknown_method() -> Result<()> {
    let dispatcher = Dispatcher::builder().handler(SUBMIT_TRANSACTION, Echo).build()?;
    let status = dispatcher.dispatch("Nonexistent", &[]).await.err();
    assert_eq!(status.map(|s| s.code()), Some(Code::Unimplemented));
    Ok(())
}

#[tokio::test]
async fn test_dispatch_unregistered_method() -> Result<()> {
    let dispatcher = Dispatcher::builder().handler(SUBMIT_TRANSACTION, Echo).build()?;
    assert!(dispatcher.serves("Gateway.SubmitTransaction"));
    assert!(!dispatcher.serves(EVALUATE_TRANSACTION));

    let status = dispatcher.dispatch(EVALUATE_TRANSACTION, &[]).await.err();
    assert_eq!(status.map(|s| s.code()), Some(Code::Unimplemented));
    Ok(())
}

#[tokio::test]
async fn test_dispatch_round_trip() -> Result<()> {
    let dispatcher = Dispatcher::builder()
        .handler(SUBMIT_TRANSACTION, handler_fn(|_ctx, _req| async { Ok(Response::new(vec![1, 2])) }))
        .build()?;

    let request = gatepack::encode(&Transaction::new("mychannel", "fabcar", "queryAllCars"))?;
    let reply = dispatcher.dispatch(SUBMIT_TRANSACTION, &request).await?;
    assert_eq!(reply, vec![0x0A, 0x02, 0x01, 0x02]);

    let response: Response = gatepack::decode(&reply)?;
    assert_eq!(response.value, vec![1, 2]);
    Ok(())
}

#[tokio::test]
async fn test_dispatch_empty_request() -> Result<()> {
    // zero bytes decode to a default Transaction
    let dispatcher = Dispatcher::builder()
        .handler(EVALUATE_TRANSACTION, handler_fn(|_ctx, req: Transaction| async move {
            assert_eq!(req, Transaction::default());
            Ok(Response::default())
        }))
        .build()?;

    let reply = dispatcher.dispatch(EVALUATE_TRANSACTION, &[]).await?;
    assert!(reply.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_dispatch_malformed_request() -> Result<()> {
    let dispatcher = Dispatcher::builder().handler(SUBMIT_TRANSACTION, Echo).build()?;

    // field 2 claims 5 bytes, 1 present
    let status = dispatcher.dispatch(SUBMIT_TRANSACTION, &[0x12, 0x05, b'a']).await.err();
    assert_eq!(status.map(|s| s.code()), Some(Code::InvalidArgument));

    // field number zero
    let status = dispatcher.dispatch(SUBMIT_TRANSACTION, &[0x02, 0x00]).await.err();
    assert_eq!(status.map(|s| s.code()), Some(Code::InvalidArgument));
    Ok(())
}

#[tokio::test]
async fn test_dispatch_context_names_method() -> Result<()> {
    let dispatcher = Dispatcher::builder()
        .handler("Gateway.EvaluateTransaction", handler_fn(|ctx: CallContext, _req| async move {
            Ok(Response::new(ctx.full_method()))
        }))
        .build()?;

    let reply = dispatcher.dispatch("/gateway.Gateway/EvaluateTransaction", &[]).await?;
    let response: Response = gatepack::decode(&reply)?;
    assert_eq!(response.value, b"/gateway.Gateway/EvaluateTransaction".to_vec());
    Ok(())
}
