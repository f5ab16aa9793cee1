//! The article-and-tag management use case.
//!
//! `Library` owns everything the original list view owned: the fetched
//! article and tag lists, the draft form for a new article (including tag
//! selection and inline tag creation), and the per-article actions. The
//! consistency policy is deliberate: after every successful mutation the
//! whole state is re-fetched from the server instead of patched locally, so
//! the rendered lists are always a direct reflection of the last successful
//! fetch. The one exception is tag creation, which appends the returned tag
//! optimistically, as the source client did.

use shiori_core::article::{Article, ArticleDraft, ArticleRepository, Tag, TagRepository};
use shiori_core::error::{Result, ShioriError};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// In-flight key for article creation (mutations on existing articles are
/// keyed by id instead).
const CREATE_ARTICLE_KEY: &str = "article:create";
/// In-flight key for tag creation.
const CREATE_TAG_KEY: &str = "tag:create";

fn article_key(id: i64) -> String {
    format!("article:{}", id)
}

/// Everything the view renders, replaced wholesale by `load_all`.
#[derive(Debug, Default)]
struct ViewState {
    articles: Vec<Article>,
    tags: Vec<Tag>,
    draft: ArticleDraft,
    draft_tag_name: String,
    loading: bool,
}

/// Use case for the article list view.
///
/// # Concurrency
///
/// Operations are cooperative async calls; the only concurrent composition
/// is the dual fetch inside `load_all`, joined all-or-nothing. Repeat
/// mutation triggers for the same target are rejected while one is in
/// flight, and a closed `Library` never applies results, so an unmounted
/// view cannot be mutated by a late response.
pub struct Library {
    /// Rendered state behind a single lock, snapshot-cloned by accessors
    state: RwLock<ViewState>,
    /// Keys of mutations currently in flight
    in_flight: Mutex<HashSet<String>>,
    /// Set once on disposal; checked before applying any async result
    closed: AtomicBool,
    article_repository: Arc<dyn ArticleRepository>,
    tag_repository: Arc<dyn TagRepository>,
}

/// Removes the in-flight key when the owning operation finishes, on every
/// exit path.
struct InFlightSlot<'a> {
    set: &'a Mutex<HashSet<String>>,
    key: String,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.set.lock().unwrap().remove(&self.key);
    }
}

impl Library {
    /// Creates a library over the given repositories.
    ///
    /// The state starts empty with the loading flag set; call `load_all`
    /// once after construction, as the view did on mount.
    pub fn new(
        article_repository: Arc<dyn ArticleRepository>,
        tag_repository: Arc<dyn TagRepository>,
    ) -> Self {
        Self {
            state: RwLock::new(ViewState {
                loading: true,
                ..Default::default()
            }),
            in_flight: Mutex::new(HashSet::new()),
            closed: AtomicBool::new(false),
            article_repository,
            tag_repository,
        }
    }

    // ============================================================================
    // Snapshots
    // ============================================================================

    /// Snapshot of the article list as of the last successful fetch.
    pub async fn articles(&self) -> Vec<Article> {
        self.state.read().await.articles.clone()
    }

    /// Snapshot of the tag list.
    pub async fn tags(&self) -> Vec<Tag> {
        self.state.read().await.tags.clone()
    }

    /// Snapshot of the draft form.
    pub async fn draft(&self) -> ArticleDraft {
        self.state.read().await.draft.clone()
    }

    /// Current inline tag-creation input.
    pub async fn draft_tag_name(&self) -> String {
        self.state.read().await.draft_tag_name.clone()
    }

    /// True until the first successful fetch completes.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    // ============================================================================
    // Draft form edits (pure local state, no network)
    // ============================================================================

    pub async fn set_draft_url(&self, url: impl Into<String>) {
        self.state.write().await.draft.url = url.into();
    }

    pub async fn set_draft_title(&self, title: impl Into<String>) {
        self.state.write().await.draft.title = title.into();
    }

    pub async fn set_draft_memo(&self, memo: impl Into<String>) {
        self.state.write().await.draft.memo = memo.into();
    }

    pub async fn set_draft_tag_name(&self, name: impl Into<String>) {
        self.state.write().await.draft_tag_name = name.into();
    }

    /// Flips tag `id` in the draft's selection set. Each call flips exactly
    /// once; no request is sent.
    pub async fn toggle_tag_selection(&self, id: i64) {
        self.state.write().await.draft.toggle_tag(id);
    }

    // ============================================================================
    // Fetch
    // ============================================================================

    /// Fetches articles and tags concurrently and replaces both lists.
    ///
    /// The join is all-or-nothing: if either fetch fails, neither list is
    /// updated and the prior state (or the empty initial state) stands.
    /// Invoked once at startup and after every successful mutation.
    pub async fn load_all(&self) -> Result<()> {
        let fetched = tokio::try_join!(self.article_repository.list(), self.tag_repository.list());

        self.ensure_open()?;
        let mut state = self.state.write().await;
        // The flag clears once the join settles, success or not: a failed
        // first fetch renders the empty list, not an endless loading state.
        state.loading = false;
        match fetched {
            Ok((articles, tags)) => {
                state.articles = articles;
                state.tags = tags;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch articles and tags");
                Err(e)
            }
        }
    }

    // ============================================================================
    // Mutations (each one re-fetches on success, except tag creation)
    // ============================================================================

    /// Submits the draft as a new article.
    ///
    /// Requires a non-empty `url` and `title`; an invalid draft is rejected
    /// before any request. On success the lists are re-fetched and the whole
    /// draft resets to empty. On failure the draft is left populated so the
    /// user can retry without retyping.
    pub async fn submit_draft(&self) -> Result<()> {
        self.ensure_open()?;
        let body = self
            .state
            .read()
            .await
            .draft
            .to_new_article()
            .ok_or_else(|| ShioriError::validation("URL and title are required"))?;

        let _slot = self.begin(CREATE_ARTICLE_KEY)?;
        if let Err(e) = self.article_repository.create(&body).await {
            tracing::error!(error = %e, "Failed to save article");
            return Err(e);
        }

        // A failed re-fetch keeps the previous lists and is logged inside
        // load_all; the accepted draft still resets.
        let _ = self.load_all().await;

        self.ensure_open()?;
        self.state.write().await.draft.reset();
        Ok(())
    }

    /// Creates a tag from the inline input.
    ///
    /// A trimmed-empty name is rejected without a request; otherwise the
    /// name is sent exactly as typed, whitespace included. On success the
    /// returned tag is appended to the local tag list directly (no re-fetch),
    /// marked as selected in the draft, and the input clears. On failure the
    /// input is retained.
    pub async fn create_tag(&self) -> Result<Tag> {
        self.ensure_open()?;
        let name = self.state.read().await.draft_tag_name.clone();
        if name.trim().is_empty() {
            return Err(ShioriError::validation("Tag name is empty"));
        }

        let _slot = self.begin(CREATE_TAG_KEY)?;
        let tag = match self.tag_repository.create(&name).await {
            Ok(tag) => tag,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create tag");
                return Err(e);
            }
        };

        self.ensure_open()?;
        let mut state = self.state.write().await;
        state.tags.push(tag.clone());
        if !state.draft.is_tag_selected(tag.id) {
            state.draft.selected_tag_ids.push(tag.id);
        }
        state.draft_tag_name.clear();
        Ok(tag)
    }

    /// Toggles the read flag of one article.
    ///
    /// Sends the logical negation of the currently rendered value; the
    /// visible state is not flipped locally, it lags until the triggered
    /// re-fetch resolves.
    pub async fn toggle_read(&self, id: i64) -> Result<()> {
        self.ensure_open()?;
        let is_read = self
            .state
            .read()
            .await
            .articles
            .iter()
            .find(|article| article.id == id)
            .map(|article| article.is_read)
            .ok_or_else(|| ShioriError::not_found("article", id.to_string()))?;

        let _slot = self.begin(&article_key(id))?;
        if let Err(e) = self.article_repository.set_read_status(id, !is_read).await {
            tracing::error!(article_id = id, error = %e, "Failed to update read status");
            return Err(e);
        }

        let _ = self.load_all().await;
        Ok(())
    }

    /// Deletes one article.
    ///
    /// The caller must have obtained the user's explicit confirmation before
    /// calling; a declined confirmation means this is never invoked and no
    /// request is sent.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.ensure_open()?;

        let _slot = self.begin(&article_key(id))?;
        if let Err(e) = self.article_repository.delete(id).await {
            tracing::error!(article_id = id, error = %e, "Failed to delete article");
            return Err(e);
        }

        let _ = self.load_all().await;
        Ok(())
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Marks the library disposed. In-flight operations finish their network
    /// calls but no longer apply results to state.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            Err(ShioriError::Closed)
        } else {
            Ok(())
        }
    }

    /// Reserves the in-flight slot for `key`, rejecting a repeat trigger
    /// while a matching mutation is still running.
    fn begin(&self, key: &str) -> Result<InFlightSlot<'_>> {
        let mut in_flight = self.in_flight.lock().unwrap();
        if !in_flight.insert(key.to_string()) {
            tracing::debug!(action = key, "Ignoring repeat trigger, mutation in flight");
            return Err(ShioriError::busy(key));
        }
        Ok(InFlightSlot {
            set: &self.in_flight,
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shiori_core::article::{NewArticle, Tag};
    use std::sync::atomic::{AtomicI64, AtomicUsize};
    use tokio::sync::Notify;

    // Mock ArticleRepository for testing
    struct MockArticleRepository {
        articles: Mutex<Vec<Article>>,
        created: Mutex<Vec<NewArticle>>,
        patches: Mutex<Vec<(i64, bool)>>,
        deleted: Mutex<Vec<i64>>,
        list_calls: AtomicUsize,
        next_id: AtomicI64,
        fail_mutations: AtomicBool,
        fail_list: AtomicBool,
        // When set, mutations park here until notified (for guard tests)
        gate: Mutex<Option<Arc<Notify>>>,
    }

    impl MockArticleRepository {
        fn new(articles: Vec<Article>) -> Self {
            let next_id = articles.iter().map(|a| a.id).max().unwrap_or(0) + 1;
            Self {
                articles: Mutex::new(articles),
                created: Mutex::new(Vec::new()),
                patches: Mutex::new(Vec::new()),
                deleted: Mutex::new(Vec::new()),
                list_calls: AtomicUsize::new(0),
                next_id: AtomicI64::new(next_id),
                fail_mutations: AtomicBool::new(false),
                fail_list: AtomicBool::new(false),
                gate: Mutex::new(None),
            }
        }

        fn list_count(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        fn set_gate(&self, notify: Arc<Notify>) {
            *self.gate.lock().unwrap() = Some(notify);
        }

        fn clear_gate(&self) {
            *self.gate.lock().unwrap() = None;
        }

        async fn wait_at_gate(&self) {
            let gate = self.gate.lock().unwrap().clone();
            if let Some(notify) = gate {
                notify.notified().await;
            }
        }

        fn transport_error() -> ShioriError {
            ShioriError::transport("connection refused")
        }
    }

    #[async_trait]
    impl ArticleRepository for MockArticleRepository {
        async fn list(&self) -> Result<Vec<Article>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(ShioriError::http(500, "list failed"));
            }
            Ok(self.articles.lock().unwrap().clone())
        }

        async fn create(&self, article: &NewArticle) -> Result<Article> {
            self.wait_at_gate().await;
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(Self::transport_error());
            }
            self.created.lock().unwrap().push(article.clone());
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let stored = Article {
                id,
                title: article.title.clone(),
                url: article.url.clone(),
                memo: Some(article.memo.clone()),
                is_read: false,
                tags: Vec::new(),
            };
            self.articles.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn set_read_status(&self, id: i64, is_read: bool) -> Result<Article> {
            self.wait_at_gate().await;
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(Self::transport_error());
            }
            self.patches.lock().unwrap().push((id, is_read));
            let mut articles = self.articles.lock().unwrap();
            let article = articles
                .iter_mut()
                .find(|article| article.id == id)
                .ok_or_else(|| ShioriError::not_found("article", id.to_string()))?;
            article.is_read = is_read;
            Ok(article.clone())
        }

        async fn delete(&self, id: i64) -> Result<()> {
            self.wait_at_gate().await;
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(Self::transport_error());
            }
            self.deleted.lock().unwrap().push(id);
            self.articles.lock().unwrap().retain(|article| article.id != id);
            Ok(())
        }
    }

    // Mock TagRepository for testing
    struct MockTagRepository {
        tags: Mutex<Vec<Tag>>,
        created: Mutex<Vec<String>>,
        list_calls: AtomicUsize,
        next_id: AtomicI64,
        fail_mutations: AtomicBool,
        fail_list: AtomicBool,
    }

    impl MockTagRepository {
        fn new(tags: Vec<Tag>) -> Self {
            let next_id = tags.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            Self {
                tags: Mutex::new(tags),
                created: Mutex::new(Vec::new()),
                list_calls: AtomicUsize::new(0),
                next_id: AtomicI64::new(next_id),
                fail_mutations: AtomicBool::new(false),
                fail_list: AtomicBool::new(false),
            }
        }

        fn list_count(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TagRepository for MockTagRepository {
        async fn list(&self) -> Result<Vec<Tag>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(ShioriError::http(500, "list failed"));
            }
            Ok(self.tags.lock().unwrap().clone())
        }

        async fn create(&self, name: &str) -> Result<Tag> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(ShioriError::transport("connection refused"));
            }
            self.created.lock().unwrap().push(name.to_string());
            let tag = Tag {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                name: name.to_string(),
            };
            self.tags.lock().unwrap().push(tag.clone());
            Ok(tag)
        }
    }

    fn tag(id: i64, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
        }
    }

    fn article(id: i64, title: &str, is_read: bool, tags: Vec<Tag>) -> Article {
        Article {
            id,
            title: title.to_string(),
            url: format!("http://example.test/{}", id),
            memo: None,
            is_read,
            tags,
        }
    }

    fn setup(
        articles: Vec<Article>,
        tags: Vec<Tag>,
    ) -> (Library, Arc<MockArticleRepository>, Arc<MockTagRepository>) {
        let article_repo = Arc::new(MockArticleRepository::new(articles));
        let tag_repo = Arc::new(MockTagRepository::new(tags));
        let library = Library::new(article_repo.clone(), tag_repo.clone());
        (library, article_repo, tag_repo)
    }

    // ========================================================================
    // load_all
    // ========================================================================

    #[tokio::test]
    async fn test_load_all_replaces_lists_wholesale() {
        let rust = tag(1, "rust");
        let web = tag(2, "web");
        let (library, _, _) = setup(
            vec![
                article(1, "First", false, vec![rust.clone(), web.clone()]),
                article(2, "Second", true, vec![]),
            ],
            vec![rust.clone(), web.clone()],
        );

        assert!(library.is_loading().await);
        library.load_all().await.unwrap();

        let articles = library.articles().await;
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].tags, vec![rust.clone(), web.clone()]);
        assert!(articles[1].tags.is_empty());
        assert_eq!(library.tags().await, vec![rust, web]);
        assert!(!library.is_loading().await);
    }

    #[tokio::test]
    async fn test_load_all_is_all_or_nothing() {
        let (library, article_repo, tag_repo) = setup(
            vec![article(1, "First", false, vec![])],
            vec![tag(1, "rust")],
        );
        library.load_all().await.unwrap();

        // New server data arrives, but the tag fetch fails: neither list
        // may change.
        article_repo
            .articles
            .lock()
            .unwrap()
            .push(article(2, "Second", false, vec![]));
        tag_repo.fail_list.store(true, Ordering::SeqCst);

        let before_articles = library.articles().await;
        let before_tags = library.tags().await;
        assert!(library.load_all().await.is_err());
        assert_eq!(library.articles().await, before_articles);
        assert_eq!(library.tags().await, before_tags);
    }

    #[tokio::test]
    async fn test_load_all_failure_on_first_load_keeps_empty_state() {
        let (library, article_repo, _) = setup(vec![article(1, "First", false, vec![])], vec![]);
        article_repo.fail_list.store(true, Ordering::SeqCst);

        assert!(library.load_all().await.is_err());
        assert!(library.articles().await.is_empty());
        assert!(library.tags().await.is_empty());
    }

    #[tokio::test]
    async fn test_loading_clears_once_first_fetch_settles() {
        let (library, article_repo, _) = setup(vec![article(1, "First", false, vec![])], vec![]);
        article_repo.fail_list.store(true, Ordering::SeqCst);
        assert!(library.is_loading().await);

        // A failed first fetch still ends the loading state, so the view
        // falls back to the empty list instead of spinning forever.
        assert!(library.load_all().await.is_err());
        assert!(!library.is_loading().await);
    }

    // ========================================================================
    // submit_draft
    // ========================================================================

    #[tokio::test]
    async fn test_submit_draft_sends_exact_body_and_resets_form() {
        let (library, article_repo, tag_repo) = setup(vec![], vec![]);
        library.load_all().await.unwrap();

        library.set_draft_url("http://x.test").await;
        library.set_draft_title("T").await;

        let lists_before = article_repo.list_count();
        let tag_lists_before = tag_repo.list_count();
        library.submit_draft().await.unwrap();

        let created = article_repo.created.lock().unwrap().clone();
        assert_eq!(
            created,
            vec![NewArticle {
                url: "http://x.test".to_string(),
                title: "T".to_string(),
                memo: String::new(),
                tag_ids: vec![],
            }]
        );
        // Exactly one re-fetch of each list.
        assert_eq!(article_repo.list_count(), lists_before + 1);
        assert_eq!(tag_repo.list_count(), tag_lists_before + 1);
        // The form reverted to empty.
        assert_eq!(library.draft().await, ArticleDraft::default());
        // And the new article is visible through the re-fetch.
        assert_eq!(library.articles().await.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_draft_includes_selected_tags() {
        let (library, article_repo, _) = setup(vec![], vec![tag(1, "rust"), tag(2, "web")]);
        library.load_all().await.unwrap();

        library.set_draft_url("http://x.test").await;
        library.set_draft_title("T").await;
        library.set_draft_memo("later").await;
        library.toggle_tag_selection(2).await;
        library.toggle_tag_selection(1).await;

        library.submit_draft().await.unwrap();

        let created = article_repo.created.lock().unwrap().clone();
        assert_eq!(created[0].memo, "later");
        assert_eq!(created[0].tag_ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_submit_draft_rejects_missing_required_fields() {
        let (library, article_repo, _) = setup(vec![], vec![]);
        library.load_all().await.unwrap();
        library.set_draft_memo("only a memo").await;

        let lists_before = article_repo.list_count();
        let err = library.submit_draft().await.unwrap_err();

        assert!(err.is_validation());
        assert!(article_repo.created.lock().unwrap().is_empty());
        assert_eq!(article_repo.list_count(), lists_before);
    }

    #[tokio::test]
    async fn test_submit_draft_failure_retains_draft_and_lists() {
        let (library, article_repo, _) = setup(
            vec![article(1, "First", false, vec![tag(1, "rust")])],
            vec![tag(1, "rust")],
        );
        library.load_all().await.unwrap();

        library.set_draft_url("http://x.test").await;
        library.set_draft_title("T").await;
        library.toggle_tag_selection(1).await;
        article_repo.fail_mutations.store(true, Ordering::SeqCst);

        let articles_before = library.articles().await;
        let draft_before = library.draft().await;
        let err = library.submit_draft().await.unwrap_err();

        assert!(err.is_network());
        assert_eq!(library.articles().await, articles_before);
        assert_eq!(library.draft().await, draft_before);
    }

    // ========================================================================
    // create_tag
    // ========================================================================

    #[tokio::test]
    async fn test_create_tag_appends_and_selects_without_refetch() {
        let (library, _, tag_repo) = setup(vec![], vec![tag(1, "rust")]);
        library.load_all().await.unwrap();

        library.set_draft_tag_name("golang").await;
        let lists_before = tag_repo.list_count();
        let created = library.create_tag().await.unwrap();

        assert_eq!(created.name, "golang");
        let tags = library.tags().await;
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1], created);
        assert!(library.draft().await.is_tag_selected(created.id));
        assert_eq!(library.draft_tag_name().await, "");
        // The optimistic append path does not re-fetch.
        assert_eq!(tag_repo.list_count(), lists_before);
    }

    #[tokio::test]
    async fn test_create_tag_rejects_blank_name_without_request() {
        let (library, _, tag_repo) = setup(vec![], vec![]);
        library.load_all().await.unwrap();

        library.set_draft_tag_name("   ").await;
        let err = library.create_tag().await.unwrap_err();

        assert!(err.is_validation());
        assert!(tag_repo.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_tag_failure_retains_input() {
        let (library, _, tag_repo) = setup(vec![], vec![]);
        library.load_all().await.unwrap();

        library.set_draft_tag_name("golang").await;
        tag_repo.fail_mutations.store(true, Ordering::SeqCst);

        assert!(library.create_tag().await.is_err());
        assert_eq!(library.draft_tag_name().await, "golang");
        assert!(library.tags().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_tag_sends_name_verbatim() {
        let (library, _, tag_repo) = setup(vec![], vec![]);
        library.load_all().await.unwrap();

        // Trimming only gates the emptiness check; the submitted name keeps
        // whatever whitespace the user typed.
        library.set_draft_tag_name("  golang  ").await;
        library.create_tag().await.unwrap();

        assert_eq!(tag_repo.created.lock().unwrap().clone(), vec!["  golang  "]);
    }

    // ========================================================================
    // toggle_read
    // ========================================================================

    #[tokio::test]
    async fn test_toggle_read_double_negation() {
        let (library, article_repo, _) = setup(vec![article(1, "First", false, vec![])], vec![]);
        library.load_all().await.unwrap();

        library.toggle_read(1).await.unwrap();
        // The re-fetch shows the article as read; toggling again negates that.
        assert!(library.articles().await[0].is_read);
        library.toggle_read(1).await.unwrap();

        let patches = article_repo.patches.lock().unwrap().clone();
        assert_eq!(patches, vec![(1, true), (1, false)]);
        assert!(!library.articles().await[0].is_read);
    }

    #[tokio::test]
    async fn test_toggle_read_unknown_article() {
        let (library, article_repo, _) = setup(vec![], vec![]);
        library.load_all().await.unwrap();

        let err = library.toggle_read(99).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(article_repo.patches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_read_failure_leaves_state() {
        let (library, article_repo, _) = setup(vec![article(1, "First", false, vec![])], vec![]);
        library.load_all().await.unwrap();
        article_repo.fail_mutations.store(true, Ordering::SeqCst);

        let before = library.articles().await;
        assert!(library.toggle_read(1).await.is_err());
        assert_eq!(library.articles().await, before);
    }

    // ========================================================================
    // delete
    // ========================================================================

    #[tokio::test]
    async fn test_delete_sends_exactly_one_request() {
        let (library, article_repo, _) = setup(
            vec![
                article(1, "First", false, vec![]),
                article(2, "Second", false, vec![]),
            ],
            vec![],
        );
        library.load_all().await.unwrap();

        library.delete(1).await.unwrap();

        assert_eq!(article_repo.deleted.lock().unwrap().clone(), vec![1]);
        let remaining = library.articles().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 2);
    }

    #[tokio::test]
    async fn test_delete_failure_retains_article() {
        let (library, article_repo, _) = setup(vec![article(1, "First", false, vec![])], vec![]);
        library.load_all().await.unwrap();
        article_repo.fail_mutations.store(true, Ordering::SeqCst);

        let before = library.articles().await;
        assert!(library.delete(1).await.is_err());
        assert_eq!(library.articles().await, before);
    }

    // ========================================================================
    // In-flight guard
    // ========================================================================

    #[tokio::test]
    async fn test_repeat_submit_is_rejected_while_in_flight() {
        let (library, article_repo, _) = setup(vec![], vec![]);
        let library = Arc::new(library);
        library.load_all().await.unwrap();

        library.set_draft_url("http://x.test").await;
        library.set_draft_title("T").await;

        let gate = Arc::new(Notify::new());
        article_repo.set_gate(gate.clone());

        let first = tokio::spawn({
            let library = library.clone();
            async move { library.submit_draft().await }
        });
        tokio::task::yield_now().await;

        // The first submission is parked inside create; the repeat trigger
        // must be ignored without a second request.
        let err = library.submit_draft().await.unwrap_err();
        assert!(err.is_busy());

        gate.notify_one();
        first.await.unwrap().unwrap();
        assert_eq!(article_repo.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_guard_is_keyed_per_article() {
        let (library, article_repo, _) = setup(
            vec![
                article(1, "First", false, vec![]),
                article(2, "Second", false, vec![]),
            ],
            vec![],
        );
        let library = Arc::new(library);
        library.load_all().await.unwrap();

        let gate = Arc::new(Notify::new());
        article_repo.set_gate(gate.clone());

        let first = tokio::spawn({
            let library = library.clone();
            async move { library.toggle_read(1).await }
        });
        tokio::task::yield_now().await;

        // Article 1 is busy, article 1 repeats are rejected...
        assert!(library.toggle_read(1).await.unwrap_err().is_busy());

        // ...but article 2 is independent.
        article_repo.clear_gate();
        library.toggle_read(2).await.unwrap();

        gate.notify_one();
        first.await.unwrap().unwrap();
    }

    // ========================================================================
    // Disposal
    // ========================================================================

    #[tokio::test]
    async fn test_closed_library_rejects_operations() {
        let (library, article_repo, _) = setup(vec![], vec![]);
        library.load_all().await.unwrap();
        library.close();

        library.set_draft_url("http://x.test").await;
        library.set_draft_title("T").await;
        assert!(matches!(
            library.submit_draft().await,
            Err(ShioriError::Closed)
        ));
        assert!(article_repo.created.lock().unwrap().is_empty());
        assert!(matches!(library.load_all().await, Err(ShioriError::Closed)));
    }

    #[tokio::test]
    async fn test_close_during_flight_skips_state_update() {
        let (library, article_repo, _) = setup(vec![], vec![]);
        let library = Arc::new(library);
        library.load_all().await.unwrap();

        library.set_draft_url("http://x.test").await;
        library.set_draft_title("T").await;

        let gate = Arc::new(Notify::new());
        article_repo.set_gate(gate.clone());

        let pending = tokio::spawn({
            let library = library.clone();
            async move { library.submit_draft().await }
        });
        tokio::task::yield_now().await;

        // Disposed while the request is in flight: the late result must not
        // touch state.
        library.close();
        gate.notify_one();
        assert!(matches!(
            pending.await.unwrap(),
            Err(ShioriError::Closed)
        ));
        assert_eq!(library.draft().await.url, "http://x.test");
        assert!(library.articles().await.is_empty());
    }
}
