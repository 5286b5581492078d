//! Client of the QuickPay payment window: posts payment requests and authenticates callbacks.

use std::time::Duration;

use common_utils::{errors::CustomResult, types::MinorUnit};
use error_stack::{report, ResultExt};
use gateway_env::logger;
use strum::IntoEnumIterator;
use url::Url;

use crate::{
    consts,
    errors::GatewayError,
    options::PaymentOptions,
    request::{PaymentRequestParameters, RequestField},
    response::{PaymentResponseParameters, ResponseField},
    settings::{GatewaySettings, Settings},
    types::FlatMapping,
};

/// An order to be paid through the payment window.
#[derive(Clone, Debug)]
pub struct AuthorizeOrder {
    /// Merchant chosen order number, unique per transaction
    pub order_number: String,
    /// Amount in the currency's smallest unit
    pub amount: MinorUnit,
    /// Where the gateway posts the transaction result
    pub callback_url: Url,
    /// Where the customer is sent after cancelling
    pub cancel_url: Url,
    /// Where the customer is sent after paying
    pub continue_url: Url,
}

impl AuthorizeOrder {
    /// Creates an order from an amount in the currency's major unit, e.g. `12.50` for 1250 øre.
    /// The amount is rounded half to even to the nearest minor unit.
    pub fn from_major_unit(
        order_number: impl Into<String>,
        amount: f64,
        callback_url: Url,
        cancel_url: Url,
        continue_url: Url,
    ) -> CustomResult<Self, GatewayError> {
        let amount = MinorUnit::from_major_unit_as_f64(amount)
            .change_context(GatewayError::InvalidOrder)?;

        Ok(Self {
            order_number: order_number.into(),
            amount,
            callback_url,
            cancel_url,
            continue_url,
        })
    }
}

/// QuickPay payment window client.
#[derive(Clone, Debug)]
pub struct QuickPay {
    settings: GatewaySettings,
    options: PaymentOptions,
    client: reqwest::Client,
}

impl QuickPay {
    /// Creates a client posting to `settings.base_url` with the configured timeout.
    pub fn new(
        settings: GatewaySettings,
        options: PaymentOptions,
    ) -> CustomResult<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .change_context(GatewayError::RequestEncodingFailed)
            .attach_printable("failed to build the http client")?;

        Ok(Self {
            settings,
            options,
            client,
        })
    }

    /// Creates a client from loaded [`Settings`].
    pub fn from_settings(settings: &Settings) -> CustomResult<Self, GatewayError> {
        Self::new(settings.quickpay.clone(), settings.payment.clone())
    }

    /// Builds the validated request parameters for `order`, secret included.
    pub fn build_authorize_request(
        &self,
        order: &AuthorizeOrder,
    ) -> CustomResult<PaymentRequestParameters, GatewayError> {
        let mut parameters = PaymentRequestParameters::new(&self.options)
            .change_context(GatewayError::InvalidOrder)
            .attach_printable("configured payment options are malformed")?;

        parameters
            .set(RequestField::Amount, order.amount.to_string())
            .and_then(|p| p.set(RequestField::Callbackurl, order.callback_url.as_str()))
            .and_then(|p| p.set(RequestField::Cancelurl, order.cancel_url.as_str()))
            .and_then(|p| p.set(RequestField::Continueurl, order.continue_url.as_str()))
            .and_then(|p| p.set(RequestField::Merchant, self.settings.merchant.as_str()))
            .and_then(|p| p.set(RequestField::Msgtype, consts::AUTHORIZE_MSG_TYPE))
            .and_then(|p| p.set(RequestField::Ordernumber, order.order_number.as_str()))
            .and_then(|p| p.set(RequestField::Splitpayment, "0"))
            .change_context(GatewayError::InvalidOrder)?
            .set_secret(self.settings.secret.clone());

        Ok(parameters)
    }

    /// Builds the form POST for `order` without sending it.
    pub fn build_authorize_http_request(
        &self,
        order: &AuthorizeOrder,
    ) -> CustomResult<reqwest::Request, GatewayError> {
        let form = self
            .build_authorize_request(order)?
            .to_flat_mapping()
            .change_context(GatewayError::InvalidOrder)?;

        self.client
            .post(self.settings.base_url.as_str())
            .form(&form)
            .build()
            .change_context(GatewayError::RequestEncodingFailed)
    }

    /// Posts the payment request for `order` to the payment window. No retries are made.
    #[logger::instrument(skip_all, fields(order_number = %order.order_number))]
    pub async fn authorize(&self, order: &AuthorizeOrder) -> CustomResult<(), GatewayError> {
        let request = self.build_authorize_http_request(order)?;
        logger::debug!(url = %request.url(), "posting payment request");

        let response = self
            .client
            .execute(request)
            .await
            .change_context(GatewayError::RequestSendingFailed)?;

        let status = response.status();
        logger::info!(status_code = status.as_u16(), "payment window responded");

        if status.is_success() {
            Ok(())
        } else {
            Err(report!(GatewayError::UnexpectedResponseStatus {
                status_code: status.as_u16()
            }))
        }
    }

    /// Reads a callback and authenticates it against the merchant secret.
    ///
    /// Returns the parameters only when the received `md5check` equals the recomputed one,
    /// compared case-insensitively.
    pub fn callback(
        &self,
        fields: FlatMapping,
    ) -> CustomResult<PaymentResponseParameters, GatewayError> {
        let ignored: Vec<&str> = fields
            .names()
            .filter(|name| {
                !ResponseField::iter().any(|field| name.eq_ignore_ascii_case(field.into()))
            })
            .collect();
        if !ignored.is_empty() {
            logger::debug!(?ignored, "callback carries unknown fields");
        }

        let mut response = PaymentResponseParameters::from_flat_mapping(fields.iter())
            .change_context(GatewayError::InvalidCallback)?;
        response.set_secret(self.settings.secret.clone());

        let calculated = response
            .calculate_md5check()
            .change_context(GatewayError::InvalidCallback)?;
        let received = response
            .received_md5check()
            .ok_or_else(|| report!(GatewayError::CallbackRejected))
            .attach_printable("callback carries no md5check")?;

        if !calculated.eq_ignore_ascii_case(received.trim()) {
            logger::warn!(
                ordernumber = response.get(ResponseField::Ordernumber),
                "callback md5check mismatch"
            );
            return Err(report!(GatewayError::CallbackRejected));
        }

        logger::info!(
            ordernumber = response.get(ResponseField::Ordernumber),
            state = response.get(ResponseField::State),
            "callback authenticated"
        );
        Ok(response)
    }
}
