//! Seller Service - 卖家面板接口

use reqwest::multipart::{Form, Part};
use serde::de::IgnoredAny;
use std::sync::Arc;

use super::dto::{FileUpload, ProductDraft, TopUpDraft, WithdrawalDraft};
use crate::application::ApiError;
use crate::domain::marketplace::{
    BalanceRequest, PaymentMethod, Product, ProductId, WithdrawalRequest,
};
use crate::infrastructure::http::{ApiClient, RequestBody};

pub struct SellerService {
    client: Arc<ApiClient>,
}

impl SellerService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn my_products(&self) -> Result<Vec<Product>, ApiError> {
        self.client.get("/api/products/my").await
    }

    /// 创建商品，商品信息作为 JSON 字段，图片作为文件字段
    pub async fn create_product(
        &self,
        draft: &ProductDraft,
        images: Vec<FileUpload>,
    ) -> Result<Product, ApiError> {
        let product_json = serde_json::to_string(draft)
            .map_err(|e| ApiError::invalid_request(format!("Failed to serialize product: {}", e)))?;
        let product_part = Part::text(product_json)
            .mime_str("application/json")
            .map_err(|e| ApiError::invalid_request(e.to_string()))?;

        let mut form = Form::new().part("product", product_part);
        for image in images {
            form = form.part("images", image.into_part()?);
        }

        self.client.post("/api/products", form).await
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.client
            .delete::<IgnoredAny>(&format!("/api/products/{}", id))
            .await?;
        Ok(())
    }

    /// 当前余额（后端返回纯数字）
    pub async fn balance(&self) -> Result<f64, ApiError> {
        self.client.get("/api/balance").await
    }

    /// 提交充值申请并上传转账凭证
    pub async fn request_top_up(
        &self,
        draft: &TopUpDraft,
        receipt: FileUpload,
    ) -> Result<BalanceRequest, ApiError> {
        let mut form = Form::new()
            .text("amount", draft.amount.to_string())
            .text("paymentMethodId", draft.payment_method_id.to_string());
        if let Some(note) = &draft.note {
            form = form.text("note", note.clone());
        }
        form = form.part("receipt", receipt.into_part()?);

        self.client.post("/api/balance/requests", form).await
    }

    pub async fn my_balance_requests(&self) -> Result<Vec<BalanceRequest>, ApiError> {
        self.client.get("/api/balance/requests/my").await
    }

    pub async fn request_withdrawal(
        &self,
        draft: &WithdrawalDraft,
    ) -> Result<WithdrawalRequest, ApiError> {
        self.client
            .post("/api/withdrawals", RequestBody::json(draft)?)
            .await
    }

    pub async fn my_withdrawals(&self) -> Result<Vec<WithdrawalRequest>, ApiError> {
        self.client.get("/api/withdrawals/my").await
    }

    /// 充值时可选的支付方式
    pub async fn payment_methods(&self) -> Result<Vec<PaymentMethod>, ApiError> {
        let methods: Vec<PaymentMethod> = self.client.get("/api/payment-methods").await?;
        Ok(methods.into_iter().filter(|m| m.active).collect())
    }
}
