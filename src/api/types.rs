use serde::{Deserialize, Serialize};

use crate::resolver::{Entity, Kind, Searchable};

/// A user profile as served by the remote directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: i64,
  pub name: String,
  pub username: String,
  pub email: String,
  pub phone: String,
  pub website: String,
  pub address: Address,
  pub company: Company,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
  pub street: String,
  pub suite: String,
  pub city: String,
  pub zipcode: String,
  pub geo: Geo,
}

/// Coordinates arrive as strings on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geo {
  pub lat: String,
  pub lng: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
  pub name: String,
  pub catch_phrase: String,
  pub bs: String,
}

/// A blog post. `user_id` references the owning user but is not enforced
/// by the remote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
  pub id: i64,
  pub user_id: i64,
  pub title: String,
  pub body: String,
}

impl Entity for User {
  fn kind() -> Kind {
    Kind::Users
  }

  fn item_id(&self) -> String {
    self.id.to_string()
  }
}

impl Entity for Post {
  fn kind() -> Kind {
    Kind::Posts
  }

  fn item_id(&self) -> String {
    self.id.to_string()
  }
}

impl Searchable for User {
  fn search_fields(&self) -> Vec<&str> {
    vec![&self.name, &self.email, &self.company.name]
  }
}

impl Searchable for Post {
  fn search_fields(&self) -> Vec<&str> {
    vec![&self.title, &self.body]
  }
}
