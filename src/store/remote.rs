//! Hosted day-record backend.
//!
//! Speaks the PostgREST dialect used by supabase-style deployments: one
//! `day_records` table with a `date` primary key and a `payload` JSON
//! column. Every request authenticates with the project API key.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::models::DayRecord;

/// ---------------------------------------------------------------------------
/// Wire Types
/// ---------------------------------------------------------------------------

/// One row of the `day_records` table.
#[derive(Debug, Serialize, Deserialize)]
struct DayRow {
  date: NaiveDate,
  payload: DayRecord,
}

/// ---------------------------------------------------------------------------
/// Remote Client
/// ---------------------------------------------------------------------------

pub struct RemoteStore {
  client: Client,
  base_url: String,
  api_key: String,
}

impl RemoteStore {
  pub fn new(base_url: &str, api_key: &str) -> Self {
    Self {
      client: Client::new(),
      base_url: base_url.trim_end_matches('/').to_string(),
      api_key: api_key.to_string(),
    }
  }

  fn records_url(&self) -> String {
    format!("{}/rest/v1/day_records", self.base_url)
  }

  /// Fetch every stored day.
  pub async fn fetch_all(&self) -> Result<BTreeMap<NaiveDate, DayRecord>, StoreError> {
    let response = self
      .client
      .get(self.records_url())
      .query(&[("select", "date,payload")])
      .header("apikey", &self.api_key)
      .bearer_auth(&self.api_key)
      .send()
      .await?;

    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().await.unwrap_or_default();
      return Err(StoreError::Api(format!("fetch all failed, {}: {}", status, body)));
    }

    let rows: Vec<DayRow> = response.json().await?;
    Ok(rows.into_iter().map(|row| (row.date, row.payload)).collect())
  }

  /// Fetch a single day, `None` when no row matches.
  pub async fn fetch_day(&self, date: NaiveDate) -> Result<Option<DayRecord>, StoreError> {
    let date_filter = format!("eq.{}", date);
    let response = self
      .client
      .get(self.records_url())
      .query(&[("select", "date,payload"), ("date", date_filter.as_str())])
      .header("apikey", &self.api_key)
      .bearer_auth(&self.api_key)
      .send()
      .await?;

    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().await.unwrap_or_default();
      return Err(StoreError::Api(format!(
        "fetch day {} failed, {}: {}",
        date, status, body
      )));
    }

    let rows: Vec<DayRow> = response.json().await?;
    Ok(rows.into_iter().next().map(|row| row.payload))
  }

  /// Insert-or-update one day keyed on `date`.
  pub async fn push_day(&self, date: NaiveDate, record: &DayRecord) -> Result<(), StoreError> {
    let rows = [DayRow {
      date,
      payload: record.clone(),
    }];

    let response = self
      .client
      .post(self.records_url())
      .query(&[("on_conflict", "date")])
      .header("apikey", &self.api_key)
      .bearer_auth(&self.api_key)
      .header("Prefer", "resolution=merge-duplicates")
      .json(&rows)
      .send()
      .await?;

    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().await.unwrap_or_default();
      return Err(StoreError::Api(format!(
        "push day {} failed, {}: {}",
        date, status, body
      )));
    }

    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::DayPatch;
  use mockito::Matcher;

  fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
  }

  #[tokio::test]
  async fn test_fetch_all_maps_rows_by_date() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("GET", "/rest/v1/day_records")
      .match_query(Matcher::UrlEncoded("select".into(), "date,payload".into()))
      .match_header("apikey", "test-key")
      .with_status(200)
      .with_body(
        r#"[
          {"date":"2026-08-20","payload":{"wakeTime":"07:00"}},
          {"date":"2026-08-21","payload":{"mood":"high"}}
        ]"#,
      )
      .create_async()
      .await;

    let store = RemoteStore::new(&server.url(), "test-key");
    let days = store.fetch_all().await.unwrap();

    mock.assert_async().await;
    assert_eq!(days.len(), 2);
    assert_eq!(days.get(&date(20)).unwrap().wake_time.as_deref(), Some("07:00"));
  }

  #[tokio::test]
  async fn test_fetch_day_hit_and_miss() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("GET", "/rest/v1/day_records")
      .match_query(Matcher::AllOf(vec![
        Matcher::UrlEncoded("select".into(), "date,payload".into()),
        Matcher::UrlEncoded("date".into(), "eq.2026-08-20".into()),
      ]))
      .with_status(200)
      .with_body(r#"[{"date":"2026-08-20","payload":{"wakeTime":"06:45"}}]"#)
      .create_async()
      .await;
    server
      .mock("GET", "/rest/v1/day_records")
      .match_query(Matcher::AllOf(vec![
        Matcher::UrlEncoded("select".into(), "date,payload".into()),
        Matcher::UrlEncoded("date".into(), "eq.2026-08-22".into()),
      ]))
      .with_status(200)
      .with_body("[]")
      .create_async()
      .await;

    let store = RemoteStore::new(&server.url(), "test-key");

    let hit = store.fetch_day(date(20)).await.unwrap();
    assert_eq!(hit.unwrap().wake_time.as_deref(), Some("06:45"));

    let miss = store.fetch_day(date(22)).await.unwrap();
    assert!(miss.is_none());
  }

  #[tokio::test]
  async fn test_push_day_upserts_on_date_conflict() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("POST", "/rest/v1/day_records")
      .match_query(Matcher::UrlEncoded("on_conflict".into(), "date".into()))
      .match_header("prefer", "resolution=merge-duplicates")
      .match_header("authorization", "Bearer test-key")
      .match_body(Matcher::PartialJsonString(
        r#"[{"date":"2026-08-20","payload":{"wakeTime":"07:30"}}]"#.to_string(),
      ))
      .with_status(201)
      .create_async()
      .await;

    let mut record = DayRecord::default();
    record.merge(DayPatch {
      wake_time: Some("07:30".to_string()),
      ..Default::default()
    });

    let store = RemoteStore::new(&server.url(), "test-key");
    store.push_day(date(20), &record).await.unwrap();

    mock.assert_async().await;
  }

  #[tokio::test]
  async fn test_server_error_surfaces_as_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("GET", "/rest/v1/day_records")
      .match_query(Matcher::Any)
      .with_status(500)
      .with_body("boom")
      .create_async()
      .await;

    let store = RemoteStore::new(&server.url(), "test-key");
    let err = store.fetch_all().await.unwrap_err();

    assert!(matches!(err, StoreError::Api(_)));
    assert!(err.to_string().contains("500"));
  }

  #[tokio::test]
  async fn test_unreachable_host_surfaces_as_request_error() {
    // Reserved port with nothing listening
    let store = RemoteStore::new("http://127.0.0.1:9", "test-key");
    let err = store.fetch_all().await.unwrap_err();

    assert!(matches!(err, StoreError::Request(_)));
  }
}
