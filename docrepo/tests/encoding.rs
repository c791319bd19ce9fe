mod common;

use std::sync::Arc;

use bson::{Binary, Bson, spec::BinarySubtype, uuid::UuidRepresentation};
use common::{DSN, OrderLine};
use docrepo::{document::ID_FIELD, memory::MemoryClient, prelude::*};

async fn stored_id(context: &DbContext<MemoryClient>) -> Binary {
    let stored = context
        .database()
        .unwrap()
        .find_documents("orderLines")
        .await
        .unwrap();

    match stored.first().and_then(|doc| doc.get(ID_FIELD)) {
        Some(Bson::Binary(id)) => id.clone(),
        other => panic!("expected a binary key, got {other:?}"),
    }
}

#[tokio::test]
async fn standard_encoding_is_the_default() {
    let context = DbContext::<MemoryClient>::connect(DSN, "shop").await.unwrap();
    let line = OrderLine::new("A-1", 1);
    context.collection::<OrderLine>(None).unwrap().insert_one(&line).await.unwrap();

    let id = stored_id(&context).await;
    assert_eq!(id.subtype, BinarySubtype::Uuid);
    assert_eq!(id.bytes, line.id.bytes().to_vec());
}

#[tokio::test]
async fn encoding_change_reaches_existing_contexts_and_handles() {
    let client = Arc::new(ClientContext::<MemoryClient>::connect(DSN).await.unwrap());
    let context = DbContext::with_database(Arc::clone(&client), "shop");
    let lines = context.collection::<OrderLine>(None).unwrap();

    client.set_id_encoding(IdEncoding::CSharpLegacy).unwrap();
    assert_eq!(client.id_encoding(), IdEncoding::CSharpLegacy);

    let line = OrderLine::new("A-1", 1);
    lines.insert_one(&line).await.unwrap();

    let id = stored_id(&context).await;
    assert_eq!(id.subtype, BinarySubtype::UuidOld);
    assert_eq!(
        id,
        Binary::from_uuid_with_representation(line.id, UuidRepresentation::CSharpLegacy)
    );
    assert_eq!(lines.find_one(&line.id).await.unwrap(), Some(line));
}

#[tokio::test]
async fn encoding_is_sealed_after_first_operation() {
    let client = Arc::new(
        ClientContext::<MemoryClient>::builder(DSN)
            .id_encoding(IdEncoding::JavaLegacy)
            .build()
            .await
            .unwrap(),
    );
    let context = DbContext::with_database(Arc::clone(&client), "shop");

    // Resolving handles is not traffic
    let lines = context.collection::<OrderLine>(Some("tenantA")).unwrap();
    assert!(!client.settings().is_sealed());

    lines.find_one(&OrderLine::new("A-1", 1).id).await.unwrap();
    assert!(client.settings().is_sealed());

    assert!(matches!(
        client.set_id_encoding(IdEncoding::Standard),
        Err(DocumentStoreError::ConfigurationSealed)
    ));
    assert_eq!(client.id_encoding(), IdEncoding::JavaLegacy);
}

#[tokio::test]
async fn clients_do_not_share_encoding() {
    let first = ClientContext::<MemoryClient>::connect(DSN).await.unwrap();
    let second = ClientContext::<MemoryClient>::connect(DSN).await.unwrap();

    first.set_id_encoding(IdEncoding::PythonLegacy).unwrap();
    first.settings().id_encoding();

    assert_eq!(second.id_encoding(), IdEncoding::Standard);
    assert!(second.set_id_encoding(IdEncoding::CSharpLegacy).is_ok());
}

#[tokio::test]
async fn key_lookups_use_the_same_encoding_as_writes() {
    let client = Arc::new(
        ClientContext::<MemoryClient>::builder(DSN)
            .id_encoding(IdEncoding::CSharpLegacy)
            .build()
            .await
            .unwrap(),
    );
    let repository = Repository::new(DbContext::with_database(client, "shop"));

    let line = OrderLine::new("A-1", 3);
    repository.add_one(&line, None).await.unwrap();

    let mut updated = line.clone();
    updated.quantity = 4;
    assert!(repository.update_one(&updated, None).await.unwrap());
    assert_eq!(repository.get_by_id::<OrderLine>(&line.id, None).await.unwrap(), Some(updated));
    assert!(repository.delete_one::<OrderLine>(&line.id, None).await.unwrap());
}
