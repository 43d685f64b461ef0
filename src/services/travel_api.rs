use crate::{
    error::RequestError,
    models::{
        search::SearchQuery,
        travel::{Travel, TravelPayload},
    },
    services::client::{ApiClient, Endpoint, Method, Payload, RequestOptions},
};

/// Typed calls against the travel collection endpoint.
#[derive(Clone)]
pub struct TravelApi {
    client: ApiClient,
}

impl TravelApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Travel>, RequestError> {
        let payload = self
            .client
            .request(&Endpoint::root(), RequestOptions::default())
            .await?;
        decode_travels(payload)
    }

    pub async fn create(&self, travel: &TravelPayload) -> Result<Payload, RequestError> {
        let options = RequestOptions::method(Method::Post).with_body(encode(travel)?);
        self.client.request(&Endpoint::root(), options).await
    }

    pub async fn update(&self, id: i64, travel: &TravelPayload) -> Result<Payload, RequestError> {
        let options = RequestOptions::method(Method::Put).with_body(encode(travel)?);
        self.client
            .request(&Endpoint::root().segment(id.to_string()), options)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<Payload, RequestError> {
        self.client
            .request(
                &Endpoint::root().segment(id.to_string()),
                RequestOptions::method(Method::Delete),
            )
            .await
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Travel>, RequestError> {
        let payload = self
            .client
            .request(&search_endpoint(query), RequestOptions::default())
            .await?;
        decode_travels(payload)
    }
}

pub fn search_endpoint(query: &SearchQuery) -> Endpoint {
    let search = Endpoint::root().segment("search");
    match query {
        SearchQuery::All => Endpoint::root(),
        SearchQuery::Destination(value) => search.segment("destination").segment(value.as_str()),
        SearchQuery::Origin(value) => search.segment("origin").segment(value.as_str()),
        SearchQuery::Type(kind) => search.segment("type").segment(kind.label()),
        SearchQuery::Price { min, max } => search
            .segment("price")
            .query("minPrice", min.as_str())
            .query("maxPrice", max.as_str()),
    }
}

fn encode(travel: &TravelPayload) -> Result<String, RequestError> {
    serde_json::to_string(travel).map_err(|err| RequestError::Decode(err.to_string()))
}

fn decode_travels(payload: Payload) -> Result<Vec<Travel>, RequestError> {
    match payload {
        Payload::Json(value) => {
            serde_json::from_value(value).map_err(|err| RequestError::Decode(err.to_string()))
        }
        Payload::Text(_) => Err(RequestError::Decode(
            "expected a JSON array of travel records".into(),
        )),
    }
}
