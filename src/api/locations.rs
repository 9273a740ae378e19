use reqwest::Method;
use serde_json::Value;

use super::{AdminApi, ListQuery};
use crate::error::Result;
use crate::forms::{AdminForm, CityForm, CountryForm, StateForm};
use crate::models::{City, Country, Location, State};
use crate::pagination::{Page, PageQuery};

impl AdminApi {
    pub async fn list_locations(&self, page: PageQuery) -> Result<Page<Location>> {
        self.get_page("/locations", &ListQuery::page(page)).await
    }

    pub async fn list_countries(&self, page: PageQuery) -> Result<Page<Country>> {
        self.get_page("/countries", &ListQuery::page(page)).await
    }

    pub async fn list_states(&self, page: PageQuery) -> Result<Page<State>> {
        self.get_page("/states", &ListQuery::page(page)).await
    }

    pub async fn list_cities(&self, page: PageQuery) -> Result<Page<City>> {
        self.get_page("/cities", &ListQuery::page(page)).await
    }

    pub async fn create_country(&self, form: CountryForm) -> Result<Value> {
        let body = form.into_multipart()?;
        self.send_multipart(Method::POST, "/country/create", body).await
    }

    pub async fn create_state(&self, form: StateForm) -> Result<Value> {
        let body = form.into_multipart()?;
        self.send_multipart(Method::POST, "/state/create", body).await
    }

    pub async fn create_city(&self, form: CityForm) -> Result<Value> {
        let body = form.into_multipart()?;
        self.send_multipart(Method::POST, "/city/create", body).await
    }

    pub async fn update_country(&self, id: u64, country: &Country) -> Result<Value> {
        country.validate()?;
        self.send_json(Method::PUT, &format!("/country/update/{}", id), country)
            .await
    }

    pub async fn delete_country(&self, id: u64) -> Result<Value> {
        self.delete(&format!("/country/delete/{}", id)).await
    }

    pub async fn delete_state(&self, id: u64) -> Result<Value> {
        self.delete(&format!("/state/delete/{}", id)).await
    }

    pub async fn delete_city(&self, id: u64) -> Result<Value> {
        self.delete(&format!("/city/delete/{}", id)).await
    }
}
