use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Partial unique index allowing at most one draft request per creator.
///
/// Entity-derived schemas cannot express partial indexes, so tests that exercise the
/// draft singleton add it through `with_single_draft_index()`.
const SINGLE_DRAFT_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
    idx_searching_request_single_draft ON searching_request (creator_id) WHERE status = 1";

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::Channel;
///
/// let test = TestBuilder::new()
///     .with_table(Channel)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// Vector of CREATE TABLE statements to execute during database setup.
    ///
    /// Each statement is generated from an entity model using SeaORM's schema builder.
    /// Statements are executed in the order they were added during `build()`.
    tables: Vec<TableCreateStatement>,

    /// Raw SQL statements executed after every table has been created.
    statements: Vec<String>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with empty table configuration
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            statements: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after their referenced
    /// tables.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds a raw SQL statement executed once all tables exist.
    ///
    /// # Arguments
    /// - `sql` - Statement to execute verbatim
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_statement(mut self, sql: impl Into<String>) -> Self {
        self.statements.push(sql.into());
        self
    }

    /// Adds the partial unique index that keeps one draft per creator.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_single_draft_index(self) -> Self {
        self.with_statement(SINGLE_DRAFT_INDEX)
    }

    /// Adds all tables required for request and link operations.
    ///
    /// This convenience method adds the following in dependency order:
    /// - Channel
    /// - SearchingRequest
    /// - RequestChannel
    /// - the single-draft partial index
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_request_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_request_tables(self) -> Self {
        self.with_table(Channel)
            .with_table(SearchingRequest)
            .with_table(RequestChannel)
            .with_single_draft_index()
    }

    /// Builds the test context, creating the database and every configured table.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context holding the initialized database connection
    /// - `Err(TestError::Database)` - Failed to connect or to create the schema
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_statements(self.statements).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
