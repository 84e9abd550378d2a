use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clients::{ClientRecord, ClientStatus};

pub type Predicate<T> = Box<dyn Fn(&T) -> bool>;

/// One page of a filtered, sorted collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Filter, sort, paginate. Predicates are AND-combined; the requested page is
/// clamped to `[1, total_pages]` (an empty result keeps page 1). Pure and
/// idempotent, safe to recompute on every query.
pub fn paginate<T, C>(
    items: &[T],
    predicates: &[Predicate<T>],
    compare: C,
    page: usize,
    page_size: usize,
) -> Page<T>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    let mut filtered: Vec<T> = items
        .iter()
        .filter(|&item| predicates.iter().all(|p| p(item)))
        .cloned()
        .collect();
    filtered.sort_by(|a, b| compare(a, b));

    let total_items = filtered.len();
    let page_size = page_size.max(1);
    let total_pages = total_items.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));
    let items = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Nom,
    Responsable,
    ChiffreAffaires,
    ChiffreAffairesDesc,
    Statut,
}

impl SortKey {
    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Nom => "nom",
            Self::Responsable => "responsable",
            Self::ChiffreAffaires => "ca",
            Self::ChiffreAffairesDesc => "ca-desc",
            Self::Statut => "statut",
        }
    }

    /// Total order over client records. String keys compare
    /// case-insensitively, numeric keys numerically.
    pub fn compare(&self, a: &ClientRecord, b: &ClientRecord) -> Ordering {
        match self {
            Self::Nom => a.nom.to_lowercase().cmp(&b.nom.to_lowercase()),
            Self::Responsable => a
                .responsable
                .to_lowercase()
                .cmp(&b.responsable.to_lowercase()),
            Self::ChiffreAffaires => a
                .fact
                .chiffre_affaires
                .total_cmp(&b.fact.chiffre_affaires),
            Self::ChiffreAffairesDesc => b
                .fact
                .chiffre_affaires
                .total_cmp(&a.fact.chiffre_affaires),
            Self::Statut => a.statut.cmp(&b.statut),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown sort key: {0}")]
pub struct SortKeyParseError(pub String);

impl FromStr for SortKey {
    type Err = SortKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "nom" | "name" => Ok(Self::Nom),
            "responsable" | "manager" => Ok(Self::Responsable),
            "ca" | "chiffre-affaires" => Ok(Self::ChiffreAffaires),
            "ca-desc" | "chiffre-affaires-desc" => Ok(Self::ChiffreAffairesDesc),
            "statut" | "status" => Ok(Self::Statut),
            _ => Err(SortKeyParseError(s.to_string())),
        }
    }
}

/// Listing filters as they arrive from the CLI. Each set field becomes one
/// predicate.
#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
    pub search: Option<String>,
    pub responsable: Option<String>,
    pub statut: Option<ClientStatus>,
}

impl ClientFilter {
    pub fn predicates(&self) -> Vec<Predicate<ClientRecord>> {
        let mut out: Vec<Predicate<ClientRecord>> = Vec::new();
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            out.push(Box::new(move |r: &ClientRecord| {
                r.nom.to_lowercase().contains(&needle)
                    || r.responsable.to_lowercase().contains(&needle)
            }));
        }
        if let Some(responsable) = &self.responsable {
            let wanted = responsable.to_lowercase();
            out.push(Box::new(move |r: &ClientRecord| {
                r.responsable.to_lowercase() == wanted
            }));
        }
        if let Some(statut) = self.statut {
            out.push(Box::new(move |r: &ClientRecord| r.statut == statut));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{paginate, ClientFilter, Page, Predicate, SortKey};
    use crate::clients::sample::sample_portfolio;
    use crate::clients::{ClientRecord, ClientStatus};

    fn by_nom(a: &ClientRecord, b: &ClientRecord) -> std::cmp::Ordering {
        SortKey::Nom.compare(a, b)
    }

    #[test]
    fn zero_predicates_keep_every_item() {
        let portfolio = sample_portfolio();
        let page = paginate(&portfolio, &[], by_nom, 1, portfolio.len());
        assert_eq!(page.total_items, portfolio.len());
        assert_eq!(page.total_pages, 1);

        let mut expected = portfolio.clone();
        expected.sort_by(by_nom);
        assert_eq!(page.items, expected);
    }

    #[test]
    fn pipeline_is_idempotent() {
        let portfolio = sample_portfolio();
        let filter = ClientFilter {
            search: Some("martin".to_string()),
            ..ClientFilter::default()
        };
        let first = paginate(&portfolio, &filter.predicates(), by_nom, 1, 5);
        let second = paginate(&portfolio, &filter.predicates(), by_nom, 1, 5);
        assert_eq!(first, second);
    }

    #[test]
    fn predicates_combine_with_and() {
        let portfolio = sample_portfolio();
        let filter = ClientFilter {
            responsable: Some("Claire Fontaine".to_string()),
            statut: Some(ClientStatus::Prospect),
            ..ClientFilter::default()
        };
        let page = paginate(&portfolio, &filter.predicates(), by_nom, 1, 20);
        for item in &page.items {
            assert_eq!(item.responsable, "Claire Fontaine");
            assert_eq!(item.statut, ClientStatus::Prospect);
        }
        assert_eq!(page.total_items, 1);
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_manager() {
        let portfolio = sample_portfolio();
        let filter = ClientFilter {
            search: Some("OLIVEIRA".to_string()),
            ..ClientFilter::default()
        };
        let page = paginate(&portfolio, &filter.predicates(), by_nom, 1, 20);
        assert!(!page.items.is_empty());
        for item in &page.items {
            assert!(item.responsable.to_lowercase().contains("oliveira"));
        }
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let portfolio = sample_portfolio();
        let high = paginate(&portfolio, &[], by_nom, 99, 4);
        assert_eq!(high.page, high.total_pages);
        assert!(!high.items.is_empty());

        let zero = paginate(&portfolio, &[], by_nom, 0, 4);
        assert_eq!(zero.page, 1);
    }

    #[test]
    fn empty_result_keeps_page_one() {
        let portfolio = sample_portfolio();
        let filter = ClientFilter {
            search: Some("aucun-client-ne-porte-ce-nom".to_string()),
            ..ClientFilter::default()
        };
        let page: Page<ClientRecord> = paginate(&portfolio, &filter.predicates(), by_nom, 3, 4);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn pages_split_at_page_size() {
        let portfolio = sample_portfolio();
        let page = paginate(&portfolio, &[], by_nom, 2, 4);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 4);
        let last = paginate(&portfolio, &[], by_nom, 3, 4);
        assert_eq!(last.items.len(), 2);
    }

    #[test]
    fn revenue_sort_directions_mirror_each_other() {
        let portfolio = sample_portfolio();
        let asc = paginate(
            &portfolio,
            &[],
            |a: &ClientRecord, b: &ClientRecord| SortKey::ChiffreAffaires.compare(a, b),
            1,
            portfolio.len(),
        );
        let desc = paginate(
            &portfolio,
            &[],
            |a: &ClientRecord, b: &ClientRecord| SortKey::ChiffreAffairesDesc.compare(a, b),
            1,
            portfolio.len(),
        );
        let mut reversed = desc.items.clone();
        reversed.reverse();
        let asc_ids: Vec<&str> = asc.items.iter().map(|r| r.id.as_str()).collect();
        let rev_ids: Vec<&str> = reversed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(asc_ids, rev_ids);
    }

    #[test]
    fn parses_sort_key_aliases() {
        assert_eq!(
            SortKey::from_str("ca_desc").expect("failed to parse sort key"),
            SortKey::ChiffreAffairesDesc
        );
        assert!(SortKey::from_str("inconnu").is_err());
        for key in [
            SortKey::Nom,
            SortKey::Responsable,
            SortKey::ChiffreAffaires,
            SortKey::ChiffreAffairesDesc,
            SortKey::Statut,
        ] {
            assert_eq!(
                SortKey::from_str(key.as_slug()).expect("failed to parse slug"),
                key
            );
        }
    }

    #[test]
    fn predicate_type_accepts_free_functions() {
        fn active_only(r: &ClientRecord) -> bool {
            r.statut == ClientStatus::Actif
        }
        let portfolio = sample_portfolio();
        let predicates: Vec<Predicate<ClientRecord>> = vec![Box::new(active_only)];
        let page = paginate(&portfolio, &predicates, by_nom, 1, 20);
        assert!(page.items.iter().all(|r| r.statut == ClientStatus::Actif));
    }
}
