use crate::{
    api::{attendance, employee, health},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
    error::{json_error_handler, path_error_handler, query_error_handler},
    repository::{AttendanceRepository, EmployeeRepository, UserRepository},
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{
    middleware::from_fn,
    web::{self, Data},
};
use std::sync::Arc;

/// Data-access handles injected into the handlers.
#[derive(Clone)]
pub struct Repositories {
    pub employees: Arc<dyn EmployeeRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    /// All three handles backed by one store.
    pub fn shared<R>(repo: Arc<R>) -> Self
    where
        R: EmployeeRepository + AttendanceRepository + UserRepository + 'static,
    {
        Self {
            employees: repo.clone(),
            attendance: repo.clone(),
            users: repo,
        }
    }
}

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = 60_000 / requests_per_min as u64;
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("period and burst size are non-zero");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, repos: &Repositories) {
    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));

    cfg.app_data(Data::from(repos.employees.clone()))
        .app_data(Data::from(repos.attendance.clone()))
        .app_data(Data::from(repos.users.clone()))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));

    cfg.service(
        web::scope(&config.api_prefix)
            .route("/health", web::get().to(health::health))
            // Public routes
            .service(
                web::scope("/auth")
                    .service(
                        web::resource("/login")
                            .wrap(login_limiter.clone())
                            .route(web::post().to(handlers::login)),
                    )
                    .service(
                        web::resource("/register")
                            .wrap(register_limiter)
                            .route(web::post().to(handlers::register)),
                    )
                    .service(web::resource("/logout").route(web::post().to(handlers::logout))),
            )
            // Protected routes
            .service(
                web::scope("/employees")
                    .wrap(from_fn(auth_middleware))
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    .service(
                        web::resource("/stats/summary")
                            .route(web::get().to(employee::employee_summary)),
                    )
                    .service(
                        web::resource("/employee-id/{code}")
                            .route(web::get().to(employee::get_employee_by_code)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    .wrap(from_fn(auth_middleware))
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::list_attendance))
                            .route(web::post().to(attendance::create_attendance)),
                    )
                    .service(
                        web::resource(["/date-range", "/filter/date-range"])
                            .route(web::get().to(attendance::attendance_by_date_range)),
                    )
                    .service(
                        web::resource("/stats/summary")
                            .route(web::get().to(attendance::attendance_summary)),
                    )
                    .service(
                        web::resource("/stats/shifts")
                            .route(web::get().to(attendance::shift_summary)),
                    )
                    .service(
                        web::resource("/stats/issues")
                            .route(web::get().to(attendance::time_issues)),
                    )
                    .service(
                        web::resource("/stats/employees")
                            .route(web::get().to(attendance::employee_rates)),
                    )
                    // /attendance/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(attendance::get_attendance))
                            .route(web::put().to(attendance::update_attendance))
                            .route(web::delete().to(attendance::delete_attendance)),
                    ),
            ),
    );
}
