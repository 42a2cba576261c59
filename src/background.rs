use rand::Rng;
use rand::seq::SliceRandom as _;

use crate::error::{CardError, CardResult};
use crate::fetch::{ByteFetcher, fetch_text};

/// Parses the newline-delimited background list, dropping blank lines.
pub fn parse_candidates(list: &str) -> Vec<String> {
    list.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Uniform random pick from a non-empty candidate set.
pub fn choose<'a, R: Rng>(candidates: &'a [String], rng: &mut R) -> CardResult<&'a str> {
    candidates
        .choose(rng)
        .map(String::as_str)
        .ok_or(CardError::EmptyCandidateSet)
}

/// Downloads the newline-delimited candidate list from `list_url`.
pub async fn fetch_candidates<F: ByteFetcher>(fetcher: &F, list_url: &str) -> CardResult<Vec<String>> {
    Ok(parse_candidates(&fetch_text(fetcher, list_url).await?))
}

/// Picks one candidate and retrieves its bytes.
///
/// No alternate candidate is tried on failure; retrying the whole pipeline
/// is the caller's decision.
pub async fn resolve<F: ByteFetcher, R: Rng>(
    fetcher: &F,
    candidates: &[String],
    rng: &mut R,
) -> CardResult<Vec<u8>> {
    let url = choose(candidates, rng)?;
    tracing::debug!(url, "fetching background");
    fetcher.fetch(url).await
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    use super::*;

    struct NeverFetcher;

    impl ByteFetcher for NeverFetcher {
        async fn fetch(&self, _url: &str) -> CardResult<Vec<u8>> {
            panic!("fetch must not be attempted for an empty candidate set");
        }
    }

    #[test]
    fn parse_skips_blank_and_padded_lines() {
        let list = "https://a/1.jpg\n\n  https://a/2.jpg  \r\nhttps://a/3.jpg\n";
        assert_eq!(
            parse_candidates(list),
            vec!["https://a/1.jpg", "https://a/2.jpg", "https://a/3.jpg"]
        );
    }

    #[test]
    fn choose_is_uniform_over_the_set() {
        let candidates: Vec<String> = (0..4).map(|i| format!("u{i}")).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(choose(&candidates, &mut rng).unwrap().to_string());
        }
        assert_eq!(seen.len(), candidates.len());
    }

    #[test]
    fn choose_from_empty_set_fails() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = choose(&[], &mut rng).unwrap_err();
        assert!(matches!(err, CardError::EmptyCandidateSet));
    }

    #[tokio::test]
    async fn resolve_never_fetches_when_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = resolve(&NeverFetcher, &[], &mut rng).await.unwrap_err();
        assert!(matches!(err, CardError::EmptyCandidateSet));
    }
}
