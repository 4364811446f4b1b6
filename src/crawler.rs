// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Webshell Hunting Crawler
 * Crawls in-scope pages and fans out signature probes for every page found
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::extractor::extract_links;
use crate::http_client::HttpClient;
use crate::prober::{ProbeOutcome, Prober};
use crate::reporting::MatchReporter;
use crate::resolver::{normalize, resolve, Target};
use crate::signatures::SignatureSet;
use crate::types::{CrawlTask, HuntReport, LinkMode, MatchPolicy, ProbeTask};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Tunables for a single hunt
#[derive(Debug, Clone)]
pub struct HuntOptions {
    /// Upper bound on fetch + probe requests in flight
    pub max_concurrency: usize,
    /// Stop admitting pages after this many; `None` crawls the whole site
    pub max_pages: Option<usize>,
    pub link_mode: LinkMode,
    pub match_policy: MatchPolicy,
}

impl Default for HuntOptions {
    fn default() -> Self {
        Self {
            max_concurrency: 50,
            max_pages: None,
            link_mode: LinkMode::default(),
            match_policy: MatchPolicy::default(),
        }
    }
}

/// Work queues plus the visited set. Owned by the coordinator loop only.
#[derive(Debug)]
pub struct Frontier {
    target: Arc<Target>,
    signatures: SignatureSet,
    max_pages: Option<usize>,
    visited: HashSet<String>,
    fetch_queue: VecDeque<CrawlTask>,
    probe_queue: VecDeque<ProbeTask>,
    prefer_fetch: bool,
    pages_discovered: usize,
    out_of_scope: usize,
}

#[derive(Debug)]
pub enum Task {
    Fetch(CrawlTask),
    Probe(ProbeTask),
}

impl Frontier {
    pub fn new(target: Arc<Target>, signatures: SignatureSet, max_pages: Option<usize>) -> Self {
        Self {
            target,
            signatures,
            max_pages,
            visited: HashSet::new(),
            fetch_queue: VecDeque::new(),
            probe_queue: VecDeque::new(),
            prefer_fetch: true,
            pages_discovered: 0,
            out_of_scope: 0,
        }
    }

    /// Admit `url` to the fetch queue if it is in scope and unseen. An
    /// admitted page also queues one probe per signature.
    pub fn enqueue_fetch(&mut self, url: &str) -> bool {
        if !self.target.in_scope(url) {
            debug!("[Crawler] Out of scope: {}", url);
            self.out_of_scope += 1;
            return false;
        }

        let Some(key) = normalize(url) else {
            return false;
        };

        if self.visited.contains(&key) {
            return false;
        }

        if let Some(limit) = self.max_pages {
            if self.visited.len() >= limit {
                debug!("[Crawler] Page limit ({}) reached, dropping {}", limit, key);
                return false;
            }
        }

        self.visited.insert(key.clone());
        self.pages_discovered += 1;
        info!("[Crawler] {}", key);

        for signature in self.signatures.iter() {
            self.probe_queue.push_back(ProbeTask::new(&key, signature));
        }
        self.fetch_queue.push_back(CrawlTask { url: key });

        true
    }

    /// Next task to run, alternating between the queues so page discovery
    /// and probing both make progress.
    pub fn next_task(&mut self) -> Option<Task> {
        let fetch_first = self.prefer_fetch;
        self.prefer_fetch = !self.prefer_fetch;

        if fetch_first {
            self.fetch_queue
                .pop_front()
                .map(Task::Fetch)
                .or_else(|| self.probe_queue.pop_front().map(Task::Probe))
        } else {
            self.probe_queue
                .pop_front()
                .map(Task::Probe)
                .or_else(|| self.fetch_queue.pop_front().map(Task::Fetch))
        }
    }

    /// Queued but not yet started
    pub fn pending(&self) -> usize {
        self.fetch_queue.len() + self.probe_queue.len()
    }

    pub fn pages_discovered(&self) -> usize {
        self.pages_discovered
    }

    pub fn out_of_scope(&self) -> usize {
        self.out_of_scope
    }
}

#[derive(Debug)]
enum TaskOutcome {
    Fetched { url: String, links: Vec<String> },
    FetchFailed,
    Probed(ProbeOutcome),
    ProbeFailed,
}

/// Crawl-and-probe engine for one target
pub struct Hunter {
    target: Arc<Target>,
    signatures: SignatureSet,
    http_client: HttpClient,
    prober: Prober,
    reporter: Arc<dyn MatchReporter>,
    options: HuntOptions,
}

impl Hunter {
    pub fn new(
        target: Target,
        signatures: SignatureSet,
        http_client: HttpClient,
        reporter: Arc<dyn MatchReporter>,
        options: HuntOptions,
    ) -> Self {
        let prober = Prober::new(http_client.clone(), options.match_policy);
        Self {
            target: Arc::new(target),
            signatures,
            http_client,
            prober,
            reporter,
            options,
        }
    }

    /// Run until every queue is drained and nothing is in flight.
    ///
    /// Dropping the returned future aborts all in-flight requests.
    pub async fn run(&self) -> HuntReport {
        let started = Instant::now();
        let max_in_flight = self.options.max_concurrency.max(1);

        info!(
            "[Crawler] Hunting {} with {} signatures (concurrency {}, policy {})",
            self.target.url(),
            self.signatures.len(),
            max_in_flight,
            self.options.match_policy
        );

        let mut frontier = Frontier::new(
            self.target.clone(),
            self.signatures.clone(),
            self.options.max_pages,
        );
        let mut report = HuntReport {
            target: self.target.url().to_string(),
            ..HuntReport::default()
        };
        let mut in_flight: JoinSet<TaskOutcome> = JoinSet::new();

        frontier.enqueue_fetch(self.target.url());

        loop {
            while in_flight.len() < max_in_flight {
                match frontier.next_task() {
                    Some(Task::Fetch(task)) => {
                        in_flight.spawn(fetch_and_process(
                            self.http_client.clone(),
                            self.target.clone(),
                            task.url,
                            self.options.link_mode,
                        ));
                    }
                    Some(Task::Probe(task)) => {
                        report.probes_sent += 1;
                        in_flight.spawn(probe(self.prober.clone(), self.reporter.clone(), task.url));
                    }
                    None => break,
                }
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };

            match joined {
                Ok(TaskOutcome::Fetched { url, links }) => {
                    report.pages_fetched += 1;
                    let admitted = links
                        .iter()
                        .filter(|link| frontier.enqueue_fetch(link))
                        .count();
                    debug!("[Crawler] {} links on {}, {} new", links.len(), url, admitted);
                }
                Ok(TaskOutcome::FetchFailed) => report.fetch_failures += 1,
                Ok(TaskOutcome::Probed(ProbeOutcome::Match(result))) => report.matches.push(result),
                Ok(TaskOutcome::Probed(ProbeOutcome::NoMatch { .. })) => {}
                Ok(TaskOutcome::ProbeFailed) => report.probe_failures += 1,
                Err(e) => warn!("[Crawler] Task aborted: {}", e),
            }

            debug!(
                "[Crawler] Outstanding: {} queued, {} in flight",
                frontier.pending(),
                in_flight.len()
            );
        }

        report.pages_discovered = frontier.pages_discovered();
        report.out_of_scope = frontier.out_of_scope();
        report.duration_ms = started.elapsed().as_millis() as u64;

        info!(
            "[Crawler] Finished: {} pages, {} probes, {} matches",
            report.pages_fetched,
            report.probes_sent,
            report.matches.len()
        );

        report
    }
}

/// Fetch one page and return its links resolved against the page URL.
/// Failures are logged here and never retried.
async fn fetch_and_process(
    http_client: HttpClient,
    target: Arc<Target>,
    url: String,
    link_mode: LinkMode,
) -> TaskOutcome {
    let response = match http_client.get(&url).await {
        Ok(response) => response,
        Err(e) => {
            warn!("[Crawler] Failed to fetch {}: {}", url, e);
            return TaskOutcome::FetchFailed;
        }
    };

    if !response.looks_like_html() {
        debug!("[Crawler] Skipping link extraction for non-HTML {}", url);
        return TaskOutcome::Fetched { url, links: Vec::new() };
    }

    let links = extract_links(&response.body, link_mode)
        .filter_map(|raw| match resolve(&url, &raw, &target) {
            Ok(absolute) => Some(absolute),
            Err(e) => {
                debug!("[Crawler] Dropping link on {}: {}", url, e);
                None
            }
        })
        .collect();

    TaskOutcome::Fetched { url, links }
}

async fn probe(prober: Prober, reporter: Arc<dyn MatchReporter>, url: String) -> TaskOutcome {
    match prober.classify(&url).await {
        Ok(outcome) => {
            if let ProbeOutcome::Match(result) = &outcome {
                reporter.report(result);
            }
            TaskOutcome::Probed(outcome)
        }
        Err(e) => {
            warn!("[Prober] {}", e);
            TaskOutcome::ProbeFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontier(signatures: &[&str], max_pages: Option<usize>) -> Frontier {
        let target = Arc::new(Target::parse("http://example.com/").unwrap());
        let sigs = SignatureSet::new(signatures.iter().map(|s| s.to_string()).collect());
        Frontier::new(target, sigs, max_pages)
    }

    fn drain(frontier: &mut Frontier) -> (Vec<String>, Vec<String>) {
        let mut fetches = Vec::new();
        let mut probes = Vec::new();
        while let Some(task) = frontier.next_task() {
            match task {
                Task::Fetch(t) => fetches.push(t.url),
                Task::Probe(t) => probes.push(t.url),
            }
        }
        (fetches, probes)
    }

    #[test]
    fn test_cross_host_link_is_never_admitted() {
        let mut f = frontier(&["shell.php"], None);

        assert!(!f.enqueue_fetch("http://evil.example.org/page"));
        assert!(!f.enqueue_fetch("http://cdn.example.com/x.js"));
        assert_eq!(f.pending(), 0);
        assert_eq!(f.out_of_scope(), 2);
    }

    #[test]
    fn test_admitted_page_queues_fetch_and_probes() {
        let mut f = frontier(&["shell.php", "c99.php"], None);

        assert!(f.enqueue_fetch("http://example.com/blog/"));
        let (fetches, mut probes) = drain(&mut f);
        probes.sort();

        assert_eq!(fetches, vec!["http://example.com/blog/"]);
        assert_eq!(
            probes,
            vec!["http://example.com/blog/c99.php", "http://example.com/blog/shell.php"]
        );
    }

    #[test]
    fn test_rediscovered_url_is_not_requeued() {
        let mut f = frontier(&["shell.php"], None);

        assert!(f.enqueue_fetch("http://example.com/a"));
        assert!(!f.enqueue_fetch("http://example.com/a"));
        assert!(!f.enqueue_fetch("http://example.com/a#section"));
        assert_eq!(f.pages_discovered(), 1);
        assert_eq!(f.pending(), 2);
    }

    #[test]
    fn test_page_limit() {
        let mut f = frontier(&[], Some(2));

        assert!(f.enqueue_fetch("http://example.com/1"));
        assert!(f.enqueue_fetch("http://example.com/2"));
        assert!(!f.enqueue_fetch("http://example.com/3"));
        assert_eq!(f.pages_discovered(), 2);
    }

    #[test]
    fn test_next_task_alternates_queues() {
        let mut f = frontier(&["a.php", "b.php"], None);
        f.enqueue_fetch("http://example.com/x/");
        f.enqueue_fetch("http://example.com/y/");

        let order: Vec<bool> = std::iter::from_fn(|| f.next_task())
            .map(|t| matches!(t, Task::Fetch(_)))
            .collect();

        assert_eq!(order.len(), 6);
        assert_eq!(&order[..4], &[true, false, true, false]);
    }
}
