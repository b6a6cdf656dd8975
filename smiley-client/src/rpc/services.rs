//! Ledger services: coupons, UBI, book chapters, DEX listings, organizations.
//!
//! The service RPCs read every argument as a string, so numbers are sent in
//! their decimal string form.

use crate::SmileyClient;
use chrono::NaiveDateTime;
use serde_json::Value;
use smiley_core::model::{ServiceType, coupon_datetime};
use smiley_core::{Params, Result};

impl SmileyClient {
    /// Register a service on the chain. Costs 10 SMLY. Returns the txid.
    pub async fn create_service(
        &self,
        name: &str,
        address: &str,
        kind: ServiceType,
    ) -> Result<String> {
        let params = Params::new().arg(name).arg(address).arg(kind);
        self.request("createservice", params).await
    }

    pub async fn delete_service(&self, service_address: &str) -> Result<String> {
        self.request("deleteservice", Params::new().arg(service_address))
            .await
    }

    pub async fn get_service_addresses(&self) -> Result<Value> {
        self.request("getserviceaddresses", Params::new()).await
    }

    /// Put a coupon up for sale. Returns the txid.
    pub async fn add_coupon(
        &self,
        service_name: &str,
        location: &str,
        coupon_name: &str,
        datetime: &NaiveDateTime,
        price: f64,
        coupon_address: &str,
    ) -> Result<String> {
        let params = Params::new()
            .arg(service_name)
            .arg(location)
            .arg(coupon_name)
            .arg(coupon_datetime(datetime))
            .arg(price.to_string())
            .arg(coupon_address);
        self.request("addcoupon", params).await
    }

    pub async fn buy_coupon(&self, coupon_address: &str) -> Result<String> {
        self.request("buycoupon", Params::new().arg(coupon_address))
            .await
    }

    pub async fn delete_coupon(&self, service_address: &str, coupon_address: &str) -> Result<String> {
        let params = Params::new().arg(service_address).arg(coupon_address);
        self.request("deletecoupon", params).await
    }

    pub async fn get_coupon_list(&self, service_address: &str) -> Result<Value> {
        self.request("getcouponlist", Params::new().arg(service_address))
            .await
    }

    pub async fn get_all_coupon_lists(&self) -> Result<Value> {
        self.request("getallcouponlists", Params::new()).await
    }

    /// Add a UBI recipient to a UBI service.
    pub async fn add_ubi(&self, service_name: &str, ubi_address: &str) -> Result<String> {
        self.request("addubi", Params::new().arg(service_name).arg(ubi_address))
            .await
    }

    pub async fn delete_ubi(&self, service_address: &str, ubi_address: &str) -> Result<String> {
        let params = Params::new().arg(service_address).arg(ubi_address);
        self.request("deleteubi", params).await
    }

    pub async fn get_ubi_list(&self) -> Result<Value> {
        self.request("getubilist", Params::new()).await
    }

    /// Add a chapter to a book chapter service.
    pub async fn add_chapter(
        &self,
        service_name: &str,
        chapter_number: u32,
        chapter_address: &str,
    ) -> Result<String> {
        let params = Params::new()
            .arg(service_name)
            .arg(chapter_number.to_string())
            .arg(chapter_address);
        self.request("addchapter", params).await
    }

    pub async fn get_book_list(&self, service_address: &str) -> Result<Value> {
        self.request("getbooklist", Params::new().arg(service_address))
            .await
    }

    /// List an address on a DEX service.
    pub async fn add_dex(&self, service_name: &str, dex_address: &str, description: &str) -> Result<String> {
        let params = Params::new()
            .arg(service_name)
            .arg(dex_address)
            .arg(description);
        self.request("adddex", params).await
    }

    pub async fn get_dex_list(&self, service_address: &str) -> Result<Value> {
        self.request("getdexlist", Params::new().arg(service_address))
            .await
    }

    pub async fn delete_org(&self, service_address: &str, org_address: &str) -> Result<String> {
        let params = Params::new().arg(service_address).arg(org_address);
        self.request("deleteorg", params).await
    }

    pub async fn get_org_list(&self, service_address: &str) -> Result<Value> {
        self.request("getorglist", Params::new().arg(service_address))
            .await
    }

    pub async fn get_all_org_lists(&self) -> Result<Value> {
        self.request("getallorglists", Params::new()).await
    }
}
