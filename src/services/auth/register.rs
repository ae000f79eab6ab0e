use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginResponse, RegisterRequest},
    users::entities::UserRole,
    users::requests::CreateUserRequest,
};
use crate::utils::jwt;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 字段校验
    if let Err(msg) = validate_username(&register_request.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }
    if let Err(msg) = validate_email(&register_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    // 只允许注册学生或家教账号
    if register_request.role == UserRole::Admin {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::RegisterFailed,
            "Admin accounts cannot be self-registered",
        )));
    }

    // 家教必须声明授课方式，预约的 teaching_mode 由它决定
    if register_request.role == UserRole::Tutor && register_request.teaching_location.is_none() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::RegisterFailed,
            "Tutors must provide a teaching location (online or physical)",
        )));
    }

    // 用户名/邮箱查重
    match storage
        .get_user_by_username(&register_request.username)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Username already taken",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check username: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Registration failed",
                )),
            );
        }
    }
    match storage.get_user_by_email(&register_request.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Email already registered",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check email: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Registration failed",
                )),
            );
        }
    }

    // 哈希密码并创建账号
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash password: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Registration failed",
                )),
            );
        }
    };

    let create_request = CreateUserRequest {
        profile_name: Some(register_request.username.clone()),
        username: register_request.username,
        email: register_request.email,
        password: password_hash,
        role: register_request.role,
        avatar_url: None,
        grade_level: register_request.grade_level,
        teaching_location: register_request.teaching_location,
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            info!("User {} registered successfully", user.username);

            match user.generate_token_pair(None).await {
                Ok(token_pair) => {
                    let response = LoginResponse {
                        access_token: token_pair.access_token,
                        expires_in: config.jwt.access_token_expiry * 60,
                        user,
                        created_at: chrono::Utc::now(),
                    };
                    let refresh_cookie =
                        jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

                    Ok(HttpResponse::Created()
                        .cookie(refresh_cookie)
                        .json(ApiResponse::success(response, "Registration successful")))
                }
                Err(e) => {
                    error!("Failed to generate token after registration: {}", e);
                    Ok(HttpResponse::Created().json(ApiResponse::success_empty(
                        "Registration successful, please log in",
                    )))
                }
            }
        }
        Err(e) => {
            error!("Registration failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Registration failed: {e}"),
            )))
        }
    }
}
