//! Contentful GraphQL content source.
//!
//! This adapter implements the `ContentSource` port against the Contentful
//! GraphQL Content API. Sections and entries are fetched page by page with
//! `limit`/`skip`; one aliased `value` field is requested per recognized
//! locale. Contentful scores a query by multiplying nested collection limits,
//! so section pages only inline the first links of each section and the rest
//! are paged per section. Failures are reported once and never retried.

use std::collections::BTreeMap;

use lexicon_application::ports::{ContentSource, SourceError};
use lexicon_domain::{ContentSnapshot, LocaleConfig, RawEntryRecord, RawSectionRecord};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Default Contentful GraphQL host.
pub const DEFAULT_BASE_URL: &str = "https://graphql.contentful.com";

/// Contentful rejects queries scored above this.
const MAX_QUERY_COMPLEXITY: usize = 11_000;
/// Largest page Contentful accepts for a collection.
const ENTRY_PAGE_SIZE: usize = 1000;
const SECTION_PAGE_SIZE: usize = 100;
/// Links inlined per section in a section page.
const VALUE_LINK_LIMIT: usize = 50;
const SUBSECTION_LINK_LIMIT: usize = 40;
/// Page size when one section's links are paged on their own.
const LINK_PAGE_SIZE: usize = 1000;

/// Score of a section page: the outer limit plus each nested limit times it.
const fn sections_query_complexity() -> usize {
    SECTION_PAGE_SIZE + SECTION_PAGE_SIZE * (VALUE_LINK_LIMIT + SUBSECTION_LINK_LIMIT)
}

const _: () = assert!(sections_query_complexity() <= MAX_QUERY_COMPLEXITY);
const _: () = assert!(LINK_PAGE_SIZE <= MAX_QUERY_COMPLEXITY);

/// Connection settings for a Contentful space.
#[derive(Debug, Clone)]
pub struct ContentfulSettings {
    /// Base URL of the GraphQL API.
    pub base_url: String,
    /// Space id.
    pub space_id: String,
    /// Environment id, usually `master`.
    pub environment_id: String,
    /// Delivery access token.
    pub access_token: String,
    /// Locales whose values are requested.
    pub locales: LocaleConfig,
}

impl ContentfulSettings {
    /// Settings for the default host.
    pub fn new(
        space_id: impl Into<String>,
        environment_id: impl Into<String>,
        access_token: impl Into<String>,
        locales: LocaleConfig,
    ) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            space_id: space_id.into(),
            environment_id: environment_id.into(),
            access_token: access_token.into(),
            locales,
        }
    }

    /// GraphQL endpoint, `<base>/content/v1/spaces/<space>/environments/<env>`.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the base URL is invalid or an id is blank.
    pub fn endpoint(&self) -> Result<Url, SourceError> {
        if self.space_id.trim().is_empty() {
            return Err(SourceError::Config("space id is not set".to_string()));
        }
        if self.environment_id.trim().is_empty() {
            return Err(SourceError::Config("environment id is not set".to_string()));
        }
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SourceError::Config(format!("invalid base URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| SourceError::Config(format!("base URL {} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend([
                "content",
                "v1",
                "spaces",
                self.space_id.trim(),
                "environments",
                self.environment_id.trim(),
            ]);
        Ok(url)
    }
}

/// Alias used for a locale's value field. GraphQL names only allow
/// `[A-Za-z0-9_]`, so `pt-BR` becomes `value_pt_BR`.
fn value_alias(locale: &str) -> String {
    let safe: String = locale
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("value_{safe}")
}

/// Builds the query for one page of sections.
fn sections_query(skip: usize) -> String {
    format!(
        "query {{ collection: localizedSectionCollection(limit: {SECTION_PAGE_SIZE}, skip: {skip}) {{ \
         total items {{ sys {{ id }} title key \
         valuesCollection(limit: {VALUE_LINK_LIMIT}) {{ total items {{ sys {{ id }} }} }} \
         subsectionsCollection(limit: {SUBSECTION_LINK_LIMIT}) {{ total items {{ sys {{ id }} }} }} }} }} }}"
    )
}

/// Link collections of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkField {
    Values,
    Subsections,
}

impl LinkField {
    const fn name(self) -> &'static str {
        match self {
            Self::Values => "valuesCollection",
            Self::Subsections => "subsectionsCollection",
        }
    }
}

/// Builds the query for one page of a single section's links.
fn links_query(section_id: &str, field: LinkField, skip: usize) -> String {
    format!(
        "query {{ section: localizedSection(id: {id}) {{ \
         links: {field}(limit: {LINK_PAGE_SIZE}, skip: {skip}) {{ total items {{ sys {{ id }} }} }} }} }}",
        id = serde_json::Value::from(section_id),
        field = field.name(),
    )
}

/// Builds the query for one page of entries.
fn entries_query(skip: usize, locales: &LocaleConfig) -> String {
    let values: Vec<String> = locales
        .locales()
        .iter()
        .map(|l| format!("{}: value(locale: \"{l}\")", value_alias(l)))
        .collect();
    format!(
        "query {{ collection: localizationEntryCollection(limit: {ENTRY_PAGE_SIZE}, skip: {skip}) {{ \
         total items {{ sys {{ id }} key originalKey androidKey lineNumber {} }} }} }}",
        values.join(" ")
    )
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CollectionData<T> {
    collection: Option<Page<T>>,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default)]
    total: usize,
    #[serde(default = "Vec::new")]
    items: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
struct Sys {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Link {
    sys: Sys,
}

#[derive(Debug, Deserialize)]
struct LinkCollection {
    #[serde(default)]
    total: usize,
    #[serde(default = "Vec::new")]
    items: Vec<Option<Link>>,
}

#[derive(Debug, Deserialize)]
struct SectionLinksData {
    section: Option<SectionLinks>,
}

#[derive(Debug, Deserialize)]
struct SectionLinks {
    links: Option<LinkCollection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SectionItem {
    sys: Sys,
    title: Option<String>,
    key: Option<String>,
    values_collection: Option<LinkCollection>,
    subsections_collection: Option<LinkCollection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryItem {
    sys: Sys,
    key: Option<String>,
    original_key: Option<String>,
    android_key: Option<String>,
    line_number: Option<u32>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

/// Link ids of one collection, completed page by page until `total`.
#[derive(Debug)]
struct LinkPager {
    ids: Vec<String>,
    /// Items seen so far, unresolvable (`null`) links included.
    fetched: usize,
    total: usize,
}

impl LinkPager {
    fn new(first: LinkCollection) -> Self {
        let mut pager = Self {
            ids: Vec::with_capacity(first.total.min(LINK_PAGE_SIZE)),
            fetched: 0,
            total: first.total,
        };
        pager.absorb(first);
        pager
    }

    /// `skip` of the next page, or `None` once every link was seen.
    fn next_skip(&self) -> Option<usize> {
        (self.fetched < self.total).then_some(self.fetched)
    }

    /// Adds one page. Returns `false` for an empty page.
    fn absorb(&mut self, page: LinkCollection) -> bool {
        let count = page.items.len();
        self.fetched += count;
        self.ids.extend(page.items.into_iter().flatten().map(|l| l.sys.id));
        count > 0
    }
}


fn entry_record(mut item: EntryItem, locales: &LocaleConfig) -> RawEntryRecord {
    let mut values_by_locale = BTreeMap::new();
    for locale in locales.locales() {
        if let Some(serde_json::Value::String(text)) = item.extra.remove(&value_alias(locale)) {
            values_by_locale.insert(locale.clone(), text);
        }
    }
    RawEntryRecord {
        id: Some(item.sys.id),
        key: item.key,
        original_key: item.original_key,
        android_key: item.android_key,
        line_number: item.line_number,
        values_by_locale,
    }
}

/// Decodes a GraphQL response, turning an `errors` array into a failure.
fn decode_data<D: DeserializeOwned>(body: &str) -> Result<Option<D>, SourceError> {
    let response: GraphQlResponse<D> =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;
    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(SourceError::Query(messages.join("; ")));
    }
    Ok(response.data)
}

/// Decodes one page of a top-level collection.
fn decode_page<T: DeserializeOwned>(body: &str) -> Result<Page<T>, SourceError> {
    decode_data::<CollectionData<T>>(body)?
        .and_then(|d| d.collection)
        .ok_or_else(|| SourceError::Decode("response has no collection".to_string()))
}

/// Decodes one page of a single section's links.
fn decode_links(body: &str, section_id: &str) -> Result<LinkCollection, SourceError> {
    decode_data::<SectionLinksData>(body)?
        .and_then(|d| d.section)
        .and_then(|s| s.links)
        .ok_or_else(|| SourceError::Decode(format!("section {section_id} returned no links")))
}

/// Content source backed by the Contentful GraphQL API.
pub struct ContentfulGraphQlSource {
    client: Client,
    settings: ContentfulSettings,
}

impl ContentfulGraphQlSource {
    /// Creates a source with a default client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(settings: ContentfulSettings) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(concat!("Lexicon/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(Self { client, settings })
    }

    async fn post(&self, endpoint: &Url, query: String) -> Result<String, SourceError> {
        let body = serde_json::json!({ "query": query });
        let response = self
            .client
            .post(endpoint.clone())
            .bearer_auth(&self.settings.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        if status.is_client_error() || status.is_server_error() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                message: if text.is_empty() {
                    status.canonical_reason().unwrap_or("error").to_string()
                } else {
                    text
                },
            });
        }
        Ok(text)
    }

    /// Fetches every page of a collection until a short page or `total`.
    async fn fetch_all<T, Q>(
        &self,
        endpoint: &Url,
        page_size: usize,
        query: Q,
    ) -> Result<Vec<T>, SourceError>
    where
        T: DeserializeOwned,
        Q: Fn(usize) -> String + Send + Sync,
    {
        let mut items = Vec::new();
        let mut skip = 0;
        loop {
            let body = self.post(endpoint, query(skip)).await?;
            let page: Page<T> = decode_page(&body)?;
            let count = page.items.len();
            debug!(skip, count, total = page.total, "fetched page");
            items.extend(page.items.into_iter().flatten());

            skip += page_size;
            if count < page_size || skip >= page.total {
                break;
            }
        }
        Ok(items)
    }

    /// Completes a section's link collection past the inlined first page.
    async fn complete_links(
        &self,
        endpoint: &Url,
        section_id: &str,
        field: LinkField,
        first: Option<LinkCollection>,
    ) -> Result<Option<Vec<String>>, SourceError> {
        let Some(first) = first else {
            return Ok(None);
        };
        let mut pager = LinkPager::new(first);
        while let Some(skip) = pager.next_skip() {
            let body = self
                .post(endpoint, links_query(section_id, field, skip))
                .await?;
            let page = decode_links(&body, section_id)?;
            debug!(
                section = section_id,
                field = field.name(),
                skip,
                count = page.items.len(),
                total = page.total,
                "fetched link page"
            );
            if !pager.absorb(page) {
                warn!(
                    section = section_id,
                    field = field.name(),
                    fetched = pager.fetched,
                    total = pager.total,
                    "link page came back empty before total was reached"
                );
                break;
            }
        }
        Ok(Some(pager.ids))
    }
}

impl ContentSource for ContentfulGraphQlSource {
    async fn fetch_snapshot(&self) -> Result<ContentSnapshot, SourceError> {
        let endpoint = self.settings.endpoint()?;
        let locales = &self.settings.locales;

        let sections: Vec<SectionItem> = self
            .fetch_all(&endpoint, SECTION_PAGE_SIZE, sections_query)
            .await?;
        let entries: Vec<EntryItem> = self
            .fetch_all(&endpoint, ENTRY_PAGE_SIZE, |skip| entries_query(skip, locales))
            .await?;

        let mut records = Vec::with_capacity(sections.len());
        for SectionItem {
            sys,
            title,
            key,
            values_collection,
            subsections_collection,
        } in sections
        {
            let entry_ids = self
                .complete_links(&endpoint, &sys.id, LinkField::Values, values_collection)
                .await?;
            let subsection_ids = self
                .complete_links(&endpoint, &sys.id, LinkField::Subsections, subsections_collection)
                .await?;
            records.push(RawSectionRecord {
                id: Some(sys.id),
                title,
                key,
                entry_ids,
                subsection_ids,
            });
        }

        Ok(ContentSnapshot::new(
            records,
            entries
                .into_iter()
                .map(|item| entry_record(item, locales))
                .collect(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings() -> ContentfulSettings {
        ContentfulSettings::new("space1", "master", "token", LocaleConfig::default())
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            settings().endpoint().unwrap().as_str(),
            "https://graphql.contentful.com/content/v1/spaces/space1/environments/master"
        );
    }

    #[test]
    fn test_endpoint_requires_space() {
        let mut settings = settings();
        settings.space_id = " ".into();
        assert!(matches!(settings.endpoint(), Err(SourceError::Config(_))));
    }

    #[test]
    fn test_entries_query_aliases_each_locale() {
        let locales = LocaleConfig::new(["en", "pt-BR"], "en");
        let query = entries_query(2000, &locales);
        assert!(query.contains("localizationEntryCollection(limit: 1000, skip: 2000)"));
        assert!(query.contains("value_en: value(locale: \"en\")"));
        assert!(query.contains("value_pt_BR: value(locale: \"pt-BR\")"));
        assert!(complexity(&query) <= MAX_QUERY_COMPLEXITY);
    }

    /// Contentful's score for a query: each collection limit multiplied by
    /// the limits of the collections it is nested in, summed.
    fn complexity(query: &str) -> usize {
        let limits: Vec<usize> = query
            .split("limit: ")
            .skip(1)
            .map(|rest| {
                rest.chars()
                    .take_while(char::is_ascii_digit)
                    .collect::<String>()
                    .parse()
                    .unwrap()
            })
            .collect();
        let (outer, nested) = limits.split_first().unwrap();
        outer + outer * nested.iter().sum::<usize>()
    }

    fn links(total: usize, ids: &[Option<&str>]) -> LinkCollection {
        LinkCollection {
            total,
            items: ids
                .iter()
                .map(|id| {
                    id.map(|id| Link {
                        sys: Sys { id: id.to_string() },
                    })
                })
                .collect(),
        }
    }

    #[test]
    fn test_sections_query_within_complexity_limit() {
        let query = sections_query(300);
        assert!(query.contains("localizedSectionCollection(limit: 100, skip: 300)"));
        assert!(query.contains("valuesCollection(limit: 50) { total items"));
        assert!(query.contains("subsectionsCollection(limit: 40) { total items"));
        assert_eq!(complexity(&query), 9100);
        assert!(complexity(&query) <= MAX_QUERY_COMPLEXITY);
    }

    #[test]
    fn test_links_query() {
        let query = links_query("s\"1", LinkField::Subsections, 40);
        assert!(query.contains(r#"localizedSection(id: "s\"1")"#));
        assert!(query.contains("links: subsectionsCollection(limit: 1000, skip: 40) { total items"));
        assert!(complexity(&query) <= MAX_QUERY_COMPLEXITY);
    }

    #[test]
    fn test_link_pager_pages_until_total() {
        let mut first_ids = vec![Some("e0"); 49];
        first_ids.push(None);
        let mut pager = LinkPager::new(links(120, &first_ids));
        assert_eq!(pager.next_skip(), Some(50));

        assert!(pager.absorb(links(120, &[Some("e1"); 50])));
        assert_eq!(pager.next_skip(), Some(100));

        assert!(pager.absorb(links(120, &[Some("e2"); 20])));
        assert_eq!(pager.next_skip(), None);
        assert_eq!(pager.ids.len(), 119);
        assert_eq!(pager.ids[49], "e1");
    }

    #[test]
    fn test_link_pager_short_collection_needs_no_paging() {
        let pager = LinkPager::new(links(2, &[Some("s2"), Some("s3")]));
        assert_eq!(pager.next_skip(), None);
        assert_eq!(pager.ids, vec!["s2".to_string(), "s3".to_string()]);
    }

    #[test]
    fn test_link_pager_stops_on_empty_page() {
        let mut pager = LinkPager::new(links(10, &[Some("e1")]));
        assert!(!pager.absorb(links(10, &[])));
        assert_eq!(pager.next_skip(), Some(1));
    }

    #[test]
    fn test_decode_sections_page() {
        let body = r#"{"data":{"collection":{"total":2,"items":[
            {"sys":{"id":"s1"},"title":"Home","key":"home",
             "valuesCollection":{"total":2,"items":[{"sys":{"id":"e1"}},null]},
             "subsectionsCollection":{"total":1,"items":[{"sys":{"id":"s2"}}]}},
            {"sys":{"id":"s2"},"title":null,"key":"banner",
             "valuesCollection":null,"subsectionsCollection":{"total":0,"items":[]}}
        ]}}}"#;
        let page: Page<SectionItem> = decode_page(body).unwrap();
        let mut items = page.items.into_iter().flatten();
        let home = items.next().unwrap();
        let banner = items.next().unwrap();

        let values = LinkPager::new(home.values_collection.unwrap());
        assert_eq!(values.ids, vec!["e1".to_string()]);
        assert_eq!(values.next_skip(), None);
        assert_eq!(home.subsections_collection.unwrap().total, 1);
        assert!(banner.values_collection.is_none());
        assert_eq!(banner.title, None);
    }

    #[test]
    fn test_decode_link_page() {
        let body = r#"{"data":{"section":{"links":{"total":1051,"items":[{"sys":{"id":"e51"}}]}}}}"#;
        let page = decode_links(body, "s1").unwrap();
        assert_eq!(page.total, 1051);
        assert_eq!(page.items.len(), 1);

        let missing = r#"{"data":{"section":null}}"#;
        assert!(matches!(
            decode_links(missing, "s1"),
            Err(SourceError::Decode(ref m)) if m.contains("s1")
        ));
    }

    #[test]
    fn test_decode_entry_values() {
        let body = r#"{"data":{"collection":{"total":1,"items":[
            {"sys":{"id":"e1"},"key":"welcome_msg","originalKey":"WELCOME",
             "androidKey":null,"lineNumber":12,
             "value_en":"Welcome","value_fr":null}
        ]}}}"#;
        let page: Page<EntryItem> = decode_page(body).unwrap();
        let item = page.items.into_iter().flatten().next().unwrap();
        let record = entry_record(item, &LocaleConfig::default());

        assert_eq!(record.key.as_deref(), Some("welcome_msg"));
        assert_eq!(record.line_number, Some(12));
        assert_eq!(record.values_by_locale.get("en").map(String::as_str), Some("Welcome"));
        assert!(!record.values_by_locale.contains_key("fr"));
    }

    #[test]
    fn test_graphql_errors_are_failures() {
        let body = r#"{"data":null,"errors":[{"message":"Query cannot be executed"},{"message":"too complex"}]}"#;
        let err = decode_page::<SectionItem>(body).unwrap_err();
        assert!(matches!(err, SourceError::Query(ref m) if m == "Query cannot be executed; too complex"));
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        assert!(matches!(
            decode_page::<SectionItem>("<html>"),
            Err(SourceError::Decode(_))
        ));
    }
}
