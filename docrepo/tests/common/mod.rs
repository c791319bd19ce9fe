#![allow(dead_code)]

use bson::{DateTime, Uuid};
use docrepo::{memory::MemoryClient, prelude::*};
use serde::{Deserialize, Serialize};

pub const DSN: &str = "memory://";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
pub struct OrderLine {
    pub id: Uuid,
    pub sku: String,
    pub quantity: u32,
    pub created_at: DateTime,
}

impl OrderLine {
    pub fn new(sku: &str, quantity: u32) -> Self {
        Self {
            id: Uuid::from(uuid::Uuid::new_v4()),
            sku: sku.to_string(),
            quantity,
            created_at: DateTime::from_chrono(chrono::Utc::now()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "custom_orders")]
pub struct Order {
    #[document(id)]
    pub number: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(id = "code")]
pub struct Category {
    pub code: i64,
    pub label: String,
}

/// Builds order lines through a repository and removes them again on cleanup.
pub struct OrderLineFixture {
    pub repository: Repository<DbContext<MemoryClient>>,
    partition: Option<String>,
    created: Vec<Uuid>,
}

impl OrderLineFixture {
    pub async fn new(partition: Option<&str>) -> Self {
        let repository = Repository::<DbContext<MemoryClient>>::connect(DSN, "shop")
            .await
            .expect("memory repository");

        Self::with_repository(repository, partition)
    }

    pub fn with_repository(
        repository: Repository<DbContext<MemoryClient>>,
        partition: Option<&str>,
    ) -> Self {
        Self {
            repository,
            partition: partition.map(str::to_string),
            created: Vec::new(),
        }
    }

    pub fn partition(&self) -> Option<&str> {
        self.partition.as_deref()
    }

    pub fn created(&self) -> &[Uuid] {
        &self.created
    }

    pub async fn create(&mut self, sku: &str, quantity: u32) -> OrderLine {
        let line = OrderLine::new(sku, quantity);

        self.repository
            .add_one(&line, self.partition())
            .await
            .expect("insert order line");
        self.created.push(line.id);

        line
    }

    /// Deletes every tracked line and returns how many were still stored.
    pub async fn cleanup(self) -> u64 {
        self.repository
            .delete_many::<OrderLine>(&self.created, self.partition())
            .await
            .expect("cleanup order lines")
    }
}
