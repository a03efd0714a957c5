use crate::form::FormRecord;
use admin_client::{AdminClient, AdminClientError, Address, Company, Geo, PostDraft, UserDraft};
use async_trait::async_trait;

/// Where the console goes after a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigate {
    List,
    Detail(i64),
}

/// Remote side of a form: how to load, create and update the record.
#[async_trait]
pub trait RemoteRecord: FormRecord {
    async fn fetch(client: &AdminClient, id: i64) -> Result<Self, AdminClientError>;

    /// Returns the server-assigned id.
    async fn create(client: &AdminClient, record: &Self) -> Result<i64, AdminClientError>;

    async fn update(client: &AdminClient, id: i64, record: &Self) -> Result<(), AdminClientError>;

    fn after_create(_id: i64) -> Navigate {
        Navigate::List
    }

    fn after_update(id: i64) -> Navigate {
        Navigate::Detail(id)
    }
}

pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

impl FormRecord for UserDraft {
    const ENTITY: &'static str = "user";
    const DRAFT_KEY: &'static str = "draft:users";
    const REQUIRED: &'static [(&'static str, &'static str)] = &[
        ("name", "Name is required"),
        ("username", "Username is required"),
        ("email", "Email is required"),
        ("phone", "Phone is required"),
        ("address.city", "City is required"),
    ];
    const FIELDS: &'static [&'static str] = &[
        "name",
        "username",
        "email",
        "phone",
        "website",
        "address.street",
        "address.suite",
        "address.city",
        "address.zipcode",
        "address.geo.lat",
        "address.geo.lng",
        "company.name",
        "company.catchPhrase",
        "company.bs",
    ];

    fn sample() -> Self {
        UserDraft {
            name: "Leanne Graham".into(),
            username: "Bret".into(),
            email: "Sincere@april.biz".into(),
            phone: "1-770-736-8031 x56442".into(),
            website: "hildegard.org".into(),
            address: Address {
                street: "Kulas Light".into(),
                suite: "Apt. 556".into(),
                city: "Gwenborough".into(),
                zipcode: "92998-3874".into(),
                geo: Geo {
                    lat: "-37.3159".into(),
                    lng: "81.1496".into(),
                },
            },
            company: Company {
                name: "Romaguera-Crona".into(),
                catch_phrase: "Multi-layered client-server neural-net".into(),
                bs: "harness real-time e-markets".into(),
            },
        }
    }

    fn field(&self, path: &str) -> Option<&str> {
        let value = match path {
            "name" => &self.name,
            "username" => &self.username,
            "email" => &self.email,
            "phone" => &self.phone,
            "website" => &self.website,
            "address.street" => &self.address.street,
            "address.suite" => &self.address.suite,
            "address.city" => &self.address.city,
            "address.zipcode" => &self.address.zipcode,
            "address.geo.lat" => &self.address.geo.lat,
            "address.geo.lng" => &self.address.geo.lng,
            "company.name" => &self.company.name,
            "company.catchPhrase" => &self.company.catch_phrase,
            "company.bs" => &self.company.bs,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn field_mut(&mut self, path: &str) -> Option<&mut String> {
        Some(match path {
            "name" => &mut self.name,
            "username" => &mut self.username,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "website" => &mut self.website,
            "address.street" => &mut self.address.street,
            "address.suite" => &mut self.address.suite,
            "address.city" => &mut self.address.city,
            "address.zipcode" => &mut self.address.zipcode,
            "address.geo.lat" => &mut self.address.geo.lat,
            "address.geo.lng" => &mut self.address.geo.lng,
            "company.name" => &mut self.company.name,
            "company.catchPhrase" => &mut self.company.catch_phrase,
            "company.bs" => &mut self.company.bs,
            _ => return None,
        })
    }

    fn email_path() -> Option<&'static str> {
        Some("email")
    }
}

#[async_trait]
impl RemoteRecord for UserDraft {
    async fn fetch(client: &AdminClient, id: i64) -> Result<Self, AdminClientError> {
        Ok(client.get_user(id).await?.profile)
    }

    async fn create(client: &AdminClient, record: &Self) -> Result<i64, AdminClientError> {
        Ok(client.create_user(record).await?.id)
    }

    async fn update(client: &AdminClient, id: i64, record: &Self) -> Result<(), AdminClientError> {
        client.update_user(id, record).await.map(|_| ())
    }
}

impl FormRecord for PostDraft {
    const ENTITY: &'static str = "post";
    const DRAFT_KEY: &'static str = "draft:posts";
    const DRAFT_SAVED_TTL_MS: i64 = 1000;
    const REQUIRED: &'static [(&'static str, &'static str)] = &[
        ("title", "Title is required"),
        ("body", "Body content is required"),
        ("userName", "User name is required"),
    ];
    const FIELDS: &'static [&'static str] = &["userName", "date", "photo", "title", "body"];

    fn template() -> Self {
        PostDraft {
            date: today(),
            ..Default::default()
        }
    }

    fn sample() -> Self {
        PostDraft {
            user_name: "Enamul Hoque".into(),
            date: today(),
            photo: "https://picsum.photos/800/400".into(),
            title: "Amazing React Component Design".into(),
            body: "This is a comprehensive guide to building modern React applications with \
                   beautiful UI components. Learn how to create scalable and maintainable code \
                   that follows best practices and industry standards."
                .into(),
        }
    }

    fn normalize_loaded(mut self) -> Self {
        if self.date.trim().is_empty() {
            self.date = today();
        }
        self
    }

    fn field(&self, path: &str) -> Option<&str> {
        let value = match path {
            "userName" => &self.user_name,
            "date" => &self.date,
            "photo" => &self.photo,
            "title" => &self.title,
            "body" => &self.body,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn field_mut(&mut self, path: &str) -> Option<&mut String> {
        Some(match path {
            "userName" => &mut self.user_name,
            "date" => &mut self.date,
            "photo" => &mut self.photo,
            "title" => &mut self.title,
            "body" => &mut self.body,
            _ => return None,
        })
    }
}

#[async_trait]
impl RemoteRecord for PostDraft {
    async fn fetch(client: &AdminClient, id: i64) -> Result<Self, AdminClientError> {
        Ok(client.get_post(id).await?.content)
    }

    async fn create(client: &AdminClient, record: &Self) -> Result<i64, AdminClientError> {
        Ok(client.create_post(record).await?.id)
    }

    async fn update(client: &AdminClient, id: i64, record: &Self) -> Result<(), AdminClientError> {
        client.update_post(id, record).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_field_is_addressable() {
        let mut user = UserDraft::default();
        for path in UserDraft::FIELDS {
            assert!(user.field_mut(path).is_some(), "{}", path);
            assert!(user.field(path).is_some(), "{}", path);
        }
        let mut post = PostDraft::default();
        for path in PostDraft::FIELDS {
            assert!(post.field_mut(path).is_some(), "{}", path);
        }
    }

    #[test]
    fn samples_pass_validation() {
        assert!(UserDraft::sample().validate().is_empty());
        assert!(PostDraft::sample().validate().is_empty());
    }

    #[test]
    fn post_template_defaults_date_to_today() {
        let template = PostDraft::template();
        assert_eq!(template.date, today());
        assert!(template.title.is_empty());
    }

    #[test]
    fn loaded_post_without_date_gets_today() {
        let loaded = PostDraft {
            title: "t".into(),
            ..Default::default()
        }
        .normalize_loaded();
        assert_eq!(loaded.date, today());
    }

    #[test]
    fn post_navigation_targets() {
        assert_eq!(PostDraft::after_create(3), Navigate::List);
        assert_eq!(PostDraft::after_update(3), Navigate::Detail(3));
    }
}
