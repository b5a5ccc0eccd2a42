use crate::{
    api::{leave_balance, leave_request, leave_type, report},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/leave")
                    .service(
                        web::scope("/types")
                            // /leave/types
                            .service(
                                web::resource("")
                                    .route(web::post().to(leave_type::create_type))
                                    .route(web::get().to(leave_type::list_types)),
                            )
                            // /leave/types/{id}
                            .service(
                                web::resource("/{id}")
                                    .route(web::get().to(leave_type::get_type))
                                    .route(web::put().to(leave_type::update_type))
                                    .route(web::delete().to(leave_type::delete_type)),
                            ),
                    )
                    .service(
                        web::scope("/balances")
                            // /leave/balances
                            .service(
                                web::resource("")
                                    .route(web::post().to(leave_balance::create_balance)),
                            )
                            // /leave/balances/employee/{employee_id}
                            .service(
                                web::resource("/employee/{employee_id}")
                                    .route(web::get().to(leave_balance::list_employee_balances)),
                            )
                            // /leave/balances/{id}
                            .service(
                                web::resource("/{id}")
                                    .route(web::put().to(leave_balance::update_balance)),
                            ),
                    )
                    .service(
                        web::scope("/requests")
                            // /leave/requests
                            .service(
                                web::resource("")
                                    .route(web::post().to(leave_request::submit_request))
                                    .route(web::get().to(leave_request::list_requests)),
                            )
                            // /leave/requests/my — must register ahead of /{id}
                            .service(
                                web::resource("/my")
                                    .route(web::get().to(leave_request::my_requests)),
                            )
                            // /leave/requests/{id}
                            .service(
                                web::resource("/{id}")
                                    .route(web::get().to(leave_request::get_request)),
                            )
                            // /leave/requests/{id}/status
                            .service(
                                web::resource("/{id}/status")
                                    .route(web::patch().to(leave_request::update_status)),
                            ),
                    )
                    .service(
                        web::scope("/reports")
                            // /leave/reports/summary
                            .service(
                                web::resource("/summary")
                                    .route(web::get().to(report::leave_summary)),
                            ),
                    ),
            ),
    );
}
