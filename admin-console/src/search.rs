//! Free-text search over list rows.

use admin_client::{Post, Task, User};

/// Records that can be matched by the free-text search box.
pub trait Searchable {
    /// The fields the search term is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match on any field. An empty term matches.
    fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.profile.name.as_str(),
            self.profile.email.as_str(),
            self.profile.username.as_str(),
            self.profile.website.as_str(),
        ]
    }
}

impl Searchable for Post {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.content.user_name.as_str(),
            self.content.title.as_str(),
            self.content.body.as_str(),
        ]
    }
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}

/// Order-preserving filter.
pub fn filter<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches(term)).collect()
}
