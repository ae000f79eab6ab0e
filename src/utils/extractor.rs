//! 路径参数安全提取器
//!
//! 把路径里的数字 ID 解析成 i64，非法值直接以统一响应格式返回 400，
//! 处理函数拿到的一定是正整数。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_safe_id_extractor {
    ($(
        $name:ident($param:literal)
    ),* $(,)?) => {
        $(
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                    let parsed = req
                        .match_info()
                        .get($param)
                        .and_then(|value| value.parse::<i64>().ok())
                        .filter(|id| *id > 0);

                    ready(match parsed {
                        Some(id) => Ok($name(id)),
                        None => {
                            let response = HttpResponse::BadRequest().json(
                                ApiResponse::error_empty(
                                    ErrorCode::BadRequest,
                                    concat!("Invalid '", $param, "' in path"),
                                ),
                            );
                            Err(actix_web::error::InternalError::from_response(
                                concat!("invalid path parameter: ", $param),
                                response,
                            )
                            .into())
                        }
                    })
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    SafeIDI64("id"),
    SafeRangeIdI64("range_id"),
    SafeBookingIdI64("booking_id"),
    SafeTutorIdI64("tutor_id"),
}
