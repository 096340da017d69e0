//! Query string <-> page conversion for collection endpoints.

use std::collections::{BTreeMap, HashMap};

use scaffold_core::error::FieldErrors;
use scaffold_core::pagination::{DEFAULT_ITEMS_PER_PAGE, Page, PageRequest};
use scaffold_shared::{PageLinks, PageResponse};

const PAGE: &str = "page";
const ITEMS_PER_PAGE: &str = "items_per_page";
const NOT_AN_INTEGER: &str = "Not a valid integer.";

/// Page size limits applied to client requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub default_items_per_page: u64,
    pub max_items_per_page: u64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_items_per_page: DEFAULT_ITEMS_PER_PAGE,
            max_items_per_page: 500,
        }
    }
}

/// Build a request from `?page=&items_per_page=`; every other parameter is
/// kept as an extra option so links can carry it forward.
pub fn page_request(
    query: &HashMap<String, String>,
    config: &PagingConfig,
) -> Result<PageRequest, FieldErrors> {
    let mut errors = FieldErrors::new();
    let page = parse_param(&mut errors, query, PAGE).unwrap_or(1);
    let items_per_page = parse_param(&mut errors, query, ITEMS_PER_PAGE)
        .unwrap_or(config.default_items_per_page)
        .min(config.max_items_per_page);

    let extra: BTreeMap<String, String> = query
        .iter()
        .filter(|(key, _)| key.as_str() != PAGE && key.as_str() != ITEMS_PER_PAGE)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    errors.into_result(PageRequest {
        page,
        item_count: None,
        items_per_page,
        extra,
    })
}

/// Negative numbers are accepted and later normalised to the first page.
fn parse_param(errors: &mut FieldErrors, query: &HashMap<String, String>, key: &str) -> Option<u64> {
    let raw = query.get(key)?;
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(u64::try_from(value).unwrap_or(0)),
        Err(_) => {
            errors.add(key, NOT_AN_INTEGER);
            None
        }
    }
}

/// Render a page, converting each item for the wire.
pub fn page_response<T, U, F>(page: Page<T>, f: F) -> PageResponse<U>
where
    F: FnMut(T) -> U,
{
    let links = PageLinks {
        previous: page
            .previous_page
            .map(|n| link(&page.extra, n, page.items_per_page)),
        next: page
            .next_page
            .map(|n| link(&page.extra, n, page.items_per_page)),
    };

    PageResponse {
        page: page.page,
        items_per_page: page.items_per_page,
        item_count: page.item_count,
        page_count: page.page_count,
        previous_page: page.previous_page,
        next_page: page.next_page,
        items: page.items.into_iter().map(f).collect(),
        links,
    }
}

fn link(extra: &BTreeMap<String, String>, page: u64, items_per_page: u64) -> String {
    let mut serializer = url::form_urlencoded::Serializer::for_suffix(String::from("?"), 1);
    serializer.extend_pairs(extra.iter());
    serializer.append_pair(PAGE, &page.to_string());
    serializer.append_pair(ITEMS_PER_PAGE, &items_per_page.to_string());
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_parameters() {
        let request = page_request(&HashMap::new(), &PagingConfig::default()).unwrap();

        assert_eq!(request.page, 1);
        assert_eq!(request.items_per_page, 50);
        assert!(request.extra.is_empty());
    }

    #[test]
    fn test_caps_items_per_page_and_keeps_extras() {
        let config = PagingConfig {
            default_items_per_page: 10,
            max_items_per_page: 100,
        };
        let request = page_request(
            &query(&[("page", "3"), ("items_per_page", "1000"), ("q", "adm")]),
            &config,
        )
        .unwrap();

        assert_eq!(request.page, 3);
        assert_eq!(request.items_per_page, 100);
        assert_eq!(request.extra.get("q").map(String::as_str), Some("adm"));
    }

    #[test]
    fn test_negative_page_becomes_zero() {
        let request = page_request(&query(&[("page", "-4")]), &PagingConfig::default()).unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.window(10).page, 1);
    }

    #[test]
    fn test_non_numeric_parameters_are_field_errors() {
        let errors = page_request(
            &query(&[("page", "two"), ("items_per_page", "")]),
            &PagingConfig::default(),
        )
        .unwrap_err();

        assert_eq!(errors.get("page"), Some(&[NOT_AN_INTEGER.to_string()][..]));
        assert!(errors.contains("items_per_page"));
    }

    #[test]
    fn test_links_carry_extra_parameters() {
        let request = PageRequest::new(2)
            .with_items_per_page(10)
            .with_extra("q", "a b");
        let page = request.window(35).into_page(vec![1, 2, 3], request.extra.clone());

        let response = page_response(page, |n| n * 10);

        assert_eq!(response.items, vec![10, 20, 30]);
        assert_eq!(response.page_count, 4);
        assert_eq!(
            response.links.previous.as_deref(),
            Some("?q=a+b&page=1&items_per_page=10")
        );
        assert_eq!(
            response.links.next.as_deref(),
            Some("?q=a+b&page=3&items_per_page=10")
        );
    }

    #[test]
    fn test_empty_page_has_no_links() {
        let request = PageRequest::default();
        let page = request.window(0).into_page(Vec::<i32>::new(), request.extra.clone());

        let response = page_response(page, |n| n);

        assert!(response.items.is_empty());
        assert_eq!(response.links, PageLinks::default());
    }
}
