//! REST client for the HubSpot CRM v3 API.
//!
//! Deals and contacts are decoded into typed records whose properties are
//! all optional, matching what HubSpot returns for sparsely filled
//! objects. Owners, pipelines and deal activities are passed through as
//! raw JSON.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::IntegrationError;
use crate::http::read_json;
use crate::source::{ConnectionStatus, CrmSource};

const SERVICE: &str = "HubSpot";

pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

const DEAL_PROPERTIES: &[&str] = &[
    "dealname",
    "amount",
    "dealstage",
    "pipeline",
    "closedate",
    "createdate",
    "hs_lastmodifieddate",
    "hubspot_owner_id",
    "description",
    "hs_deal_stage_probability",
];

const SEARCH_PROPERTIES: &[&str] = &[
    "dealname",
    "amount",
    "dealstage",
    "pipeline",
    "closedate",
    "createdate",
    "hs_lastmodifieddate",
    "hubspot_owner_id",
];

const CONTACT_PROPERTIES: &[&str] = &[
    "email",
    "firstname",
    "lastname",
    "company",
    "phone",
    "jobtitle",
    "hs_lead_status",
    "createdate",
    "lastmodifieddate",
];

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactProperties {
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub jobtitle: Option<String>,
    pub hs_lead_status: Option<String>,
    pub createdate: Option<String>,
    pub lastmodifieddate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubSpotContact {
    pub id: String,
    pub properties: ContactProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealProperties {
    pub dealname: Option<String>,
    /// Decimal amount as text, e.g. `"45000"`.
    pub amount: Option<String>,
    pub dealstage: Option<String>,
    pub pipeline: Option<String>,
    pub closedate: Option<String>,
    pub createdate: Option<String>,
    pub hs_lastmodifieddate: Option<String>,
    pub hubspot_owner_id: Option<String>,
    pub description: Option<String>,
    pub hs_deal_stage_probability: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    pub id: String,
    #[serde(rename = "type")]
    pub association_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationList {
    pub results: Vec<Association>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealAssociations {
    pub contacts: Option<AssociationList>,
    pub companies: Option<AssociationList>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubSpotDeal {
    pub id: String,
    pub properties: DealProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associations: Option<DealAssociations>,
}

impl HubSpotDeal {
    /// Deal amount as a number; missing or unparsable amounts count as 0.
    pub fn amount(&self) -> f64 {
        self.properties
            .amount
            .as_deref()
            .and_then(|a| a.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    pub fn name(&self) -> &str {
        self.properties.dealname.as_deref().unwrap_or("Untitled deal")
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    /// Cursor block as returned by HubSpot (`next.after`).
    #[serde(default)]
    pub paging: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<HubSpotDeal>,
}

#[derive(Debug, Deserialize)]
struct RawResults {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Search criteria
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    pub property_name: String,
    /// HubSpot filter operator, e.g. `EQ`.
    pub operator: String,
    pub value: String,
}

impl SearchFilter {
    pub fn eq(property_name: &str, value: &str) -> Self {
        Self {
            property_name: property_name.to_string(),
            operator: "EQ".to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSort {
    pub property_name: String,
    pub direction: SortDirection,
}

/// Criteria for `POST /crm/v3/objects/deals/search`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealSearch {
    pub filters: Vec<SearchFilter>,
    pub sorts: Vec<SearchSort>,
    /// Defaults to [`DEFAULT_PAGE_LIMIT`].
    pub limit: Option<u32>,
}

impl DealSearch {
    /// Deals owned by one HubSpot owner, most recently modified first.
    pub fn owned_by(owner_id: &str) -> Self {
        Self {
            filters: vec![SearchFilter::eq("hubspot_owner_id", owner_id)],
            sorts: vec![SearchSort {
                property_name: "hs_lastmodifieddate".to_string(),
                direction: SortDirection::Descending,
            }],
            limit: Some(DEFAULT_PAGE_LIMIT),
        }
    }

    /// A single deal by its HubSpot object id.
    pub fn by_id(deal_id: &str) -> Self {
        Self {
            filters: vec![SearchFilter::eq("hs_object_id", deal_id)],
            ..Default::default()
        }
    }

    /// JSON body for the search endpoint. All filters go in one group.
    pub fn to_request_body(&self) -> serde_json::Value {
        let filter_groups = if self.filters.is_empty() {
            serde_json::json!([])
        } else {
            serde_json::json!([{ "filters": self.filters }])
        };
        serde_json::json!({
            "filterGroups": filter_groups,
            "sorts": self.sorts,
            "properties": SEARCH_PROPERTIES,
            "limit": self.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        })
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Bearer-token client for one HubSpot account.
pub struct HubSpotClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl HubSpotClient {
    pub fn new(access_token: String) -> Self {
        Self::with_base_url(access_token, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a different API host (sandbox or proxy).
    pub fn with_base_url(access_token: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    fn get(&self, endpoint: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{endpoint}", self.base_url))
            .bearer_auth(&self.access_token)
    }

    fn post(&self, endpoint: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{endpoint}", self.base_url))
            .bearer_auth(&self.access_token)
    }

    /// List deals with their contact and company associations.
    pub async fn get_deals(
        &self,
        limit: u32,
        after: Option<&str>,
    ) -> Result<Page<HubSpotDeal>, IntegrationError> {
        let mut query = vec![
            ("limit", limit.to_string()),
            ("properties", DEAL_PROPERTIES.join(",")),
            ("associations", "contacts,companies".to_string()),
        ];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        let response = self.get("/crm/v3/objects/deals").query(&query).send().await?;
        read_json(SERVICE, response).await
    }

    /// List contacts.
    pub async fn get_contacts(
        &self,
        limit: u32,
        after: Option<&str>,
    ) -> Result<Page<HubSpotContact>, IntegrationError> {
        let mut query = vec![
            ("limit", limit.to_string()),
            ("properties", CONTACT_PROPERTIES.join(",")),
        ];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        let response = self
            .get("/crm/v3/objects/contacts")
            .query(&query)
            .send()
            .await?;
        read_json(SERVICE, response).await
    }

    /// Search deals by filter and sort criteria.
    pub async fn search_deals(
        &self,
        criteria: &DealSearch,
    ) -> Result<Vec<HubSpotDeal>, IntegrationError> {
        let response = self
            .post("/crm/v3/objects/deals/search")
            .json(&criteria.to_request_body())
            .send()
            .await?;
        let body: SearchResponse = read_json(SERVICE, response).await?;
        Ok(body.results)
    }

    /// Activities associated with a deal, as raw JSON.
    pub async fn get_deal_activities(
        &self,
        deal_id: &str,
    ) -> Result<Vec<serde_json::Value>, IntegrationError> {
        let response = self
            .get(&format!("/crm/v3/objects/deals/{deal_id}/associations/activities"))
            .send()
            .await?;
        let body: RawResults = read_json(SERVICE, response).await?;
        Ok(body.results)
    }

    /// Owner record, as raw JSON.
    pub async fn get_owner(&self, owner_id: &str) -> Result<serde_json::Value, IntegrationError> {
        let response = self
            .get(&format!("/crm/v3/owners/{owner_id}"))
            .send()
            .await?;
        read_json(SERVICE, response).await
    }

    /// Deal pipelines and their stages, as raw JSON.
    pub async fn get_pipelines(&self) -> Result<Vec<serde_json::Value>, IntegrationError> {
        let response = self.get("/crm/v3/pipelines/deals").send().await?;
        let body: RawResults = read_json(SERVICE, response).await?;
        Ok(body.results)
    }

    /// Probe the API with a one-deal listing.
    pub async fn test_connection(&self) -> ConnectionStatus {
        match self.get_deals(1, None).await {
            Ok(_) => ConnectionStatus::ok("HubSpot connection successful"),
            Err(e) => {
                tracing::warn!(error = %e, "HubSpot connection test failed");
                ConnectionStatus::failed(format!("HubSpot connection failed: {e}"))
            }
        }
    }
}

#[async_trait]
impl CrmSource for HubSpotClient {
    async fn search_deals(&self, criteria: &DealSearch) -> Result<Vec<HubSpotDeal>, IntegrationError> {
        HubSpotClient::search_deals(self, criteria).await
    }

    async fn get_contacts(
        &self,
        limit: u32,
        after: Option<&str>,
    ) -> Result<Page<HubSpotContact>, IntegrationError> {
        HubSpotClient::get_contacts(self, limit, after).await
    }

    async fn test_connection(&self) -> ConnectionStatus {
        HubSpotClient::test_connection(self).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_decodes_with_sparse_properties() {
        let json = serde_json::json!({
            "id": "101",
            "properties": { "dealname": "Acme renewal", "amount": "45000" }
        });
        let deal: HubSpotDeal = serde_json::from_value(json).unwrap();

        assert_eq!(deal.name(), "Acme renewal");
        assert_eq!(deal.amount(), 45_000.0);
        assert!(deal.properties.dealstage.is_none());
        assert!(deal.associations.is_none());
    }

    #[test]
    fn deal_decodes_associations() {
        let json = serde_json::json!({
            "id": "7",
            "properties": {},
            "associations": {
                "contacts": { "results": [{ "id": "c1", "type": "deal_to_contact" }] }
            }
        });
        let deal: HubSpotDeal = serde_json::from_value(json).unwrap();
        let contacts = deal.associations.unwrap().contacts.unwrap();
        assert_eq!(contacts.results[0].association_type, "deal_to_contact");
    }

    #[test]
    fn unparsable_amount_counts_as_zero() {
        let deal = HubSpotDeal {
            id: "1".into(),
            properties: DealProperties {
                amount: Some("n/a".into()),
                ..Default::default()
            },
            associations: None,
        };
        assert_eq!(deal.amount(), 0.0);
    }

    #[test]
    fn owner_search_body_has_filter_group_and_sort() {
        let body = DealSearch::owned_by("hs-owner-001").to_request_body();

        assert_eq!(body["filterGroups"][0]["filters"][0]["propertyName"], "hubspot_owner_id");
        assert_eq!(body["filterGroups"][0]["filters"][0]["operator"], "EQ");
        assert_eq!(body["filterGroups"][0]["filters"][0]["value"], "hs-owner-001");
        assert_eq!(body["sorts"][0]["direction"], "DESCENDING");
        assert_eq!(body["limit"], 100);
    }

    #[test]
    fn empty_search_has_no_filter_groups() {
        let body = DealSearch::default().to_request_body();
        assert_eq!(body["filterGroups"], serde_json::json!([]));
        assert_eq!(body["properties"].as_array().unwrap().len(), SEARCH_PROPERTIES.len());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = HubSpotClient::with_base_url("t".into(), "http://localhost:9000/".into());
        assert_eq!(client.base_url, "http://localhost:9000");
    }
}
