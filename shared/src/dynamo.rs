use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client as DynamoClient;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::StoreError;
use crate::store::{generate_id, server_timestamp, server_timestamp_after, UserStore};
use crate::types::{User, UserInput};

const ENTITY_TYPE: &str = "user";

type Item = HashMap<String, AttributeValue>;

/// User documents in a DynamoDB table, one item per user with `PK = SK = USER#<id>`.
pub struct DynamoUserStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoUserStore {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

fn user_key(id: &str) -> AttributeValue {
    AttributeValue::S(format!("USER#{}", id))
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn next_updated_at(previous: DateTime<Utc>) -> AttributeValue {
    AttributeValue::S(format_timestamp(server_timestamp_after(previous)))
}

fn backend_error(err: impl std::error::Error) -> StoreError {
    StoreError::Backend(DisplayErrorContext(err).to_string())
}

fn string_attr(item: &Item, id: &str, name: &str) -> Result<String, StoreError> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| StoreError::Malformed {
            id: id.to_string(),
            reason: format!("missing string attribute `{}`", name),
        })
}

fn timestamp_attr(item: &Item, id: &str, name: &str) -> Result<DateTime<Utc>, StoreError> {
    let raw = string_attr(item, id, name)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StoreError::Malformed {
            id: id.to_string(),
            reason: format!("bad timestamp in `{}`: {}", name, e),
        })
}

/// A failed `attribute_exists(PK)` condition means the document is gone.
fn update_failure(err: UpdateItemError) -> Result<Option<User>, StoreError> {
    if err.is_conditional_check_failed_exception() {
        Ok(None)
    } else {
        Err(backend_error(err))
    }
}

fn delete_failure(err: DeleteItemError) -> Result<bool, StoreError> {
    if err.is_conditional_check_failed_exception() {
        Ok(false)
    } else {
        Err(backend_error(err))
    }
}

/// Start key for the next scan page, `None` once the table is exhausted.
fn next_start_key(last_evaluated_key: Option<&Item>) -> Option<Item> {
    last_evaluated_key
        .filter(|key| !key.is_empty())
        .cloned()
}

/// Decode a stored item into a `User`.
pub(crate) fn item_to_user(item: &Item) -> Result<User, StoreError> {
    let id = item
        .get("id")
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .or_else(|| {
            item.get("PK")
                .and_then(|v| v.as_s().ok())
                .and_then(|pk| pk.strip_prefix("USER#"))
                .map(|s| s.to_string())
        })
        .ok_or_else(|| StoreError::Malformed {
            id: "<unknown>".to_string(),
            reason: "item has neither `id` nor a USER# key".to_string(),
        })?;

    Ok(User {
        name: string_attr(item, &id, "name")?,
        email: string_attr(item, &id, "email")?,
        created_at: timestamp_attr(item, &id, "created_at")?,
        updated_at: timestamp_attr(item, &id, "updated_at")?,
        id,
    })
}

#[async_trait]
impl UserStore for DynamoUserStore {
    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        let mut users = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression("entity_type = :type")
                .expression_attribute_values(":type", AttributeValue::S(ENTITY_TYPE.to_string()))
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(backend_error)?;

            for item in result.items() {
                users.push(item_to_user(item)?);
            }

            start_key = next_start_key(result.last_evaluated_key());
            if start_key.is_none() {
                break;
            }
        }

        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    async fn get(&self, id: &str) -> Result<Option<User>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", user_key(id))
            .key("SK", user_key(id))
            .send()
            .await
            .map_err(backend_error)?;

        result.item().map(item_to_user).transpose()
    }

    async fn create(&self, input: &UserInput) -> Result<User, StoreError> {
        let id = generate_id();
        let now = server_timestamp();
        let stamp = format_timestamp(now);

        // A clash on a fresh UUID fails the condition and surfaces as a store error
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("PK", user_key(&id))
            .item("SK", user_key(&id))
            .item("entity_type", AttributeValue::S(ENTITY_TYPE.to_string()))
            .item("id", AttributeValue::S(id.clone()))
            .item("name", AttributeValue::S(input.name.clone()))
            .item("email", AttributeValue::S(input.email.clone()))
            .item("created_at", AttributeValue::S(stamp.clone()))
            .item("updated_at", AttributeValue::S(stamp))
            .condition_expression("attribute_not_exists(PK)")
            .send()
            .await
            .map_err(backend_error)?;

        tracing::info!("Created user {} in {}", id, self.table_name);

        Ok(User {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(
        &self,
        id: &str,
        input: &UserInput,
        previous_updated_at: DateTime<Utc>,
    ) -> Result<Option<User>, StoreError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("PK", user_key(id))
            .key("SK", user_key(id))
            .update_expression("SET #name = :name, email = :email, updated_at = :updated_at")
            .condition_expression("attribute_exists(PK)")
            .expression_attribute_names("#name", "name")
            .expression_attribute_values(":name", AttributeValue::S(input.name.clone()))
            .expression_attribute_values(":email", AttributeValue::S(input.email.clone()))
            .expression_attribute_values(":updated_at", next_updated_at(previous_updated_at))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match result {
            Ok(output) => match output.attributes() {
                Some(item) => item_to_user(item).map(Some),
                None => Err(StoreError::Backend(format!(
                    "update of {} returned no attributes",
                    id
                ))),
            },
            Err(err) => update_failure(err.into_service_error()),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", user_key(id))
            .key("SK", user_key(id))
            .condition_expression("attribute_exists(PK)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) => delete_failure(err.into_service_error()),
        }
    }
}
