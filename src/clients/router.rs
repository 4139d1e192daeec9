use actix_web::{
    web::{self, Bytes, Data, Path},
    HttpResponse,
};

use crate::consts::consts::{PersonId, API};

use super::{error::ApiError, handlers::PersonHandler};

/// Routing table for the person API, resolved from method + path only.
///
/// | Method | Path                                | Handler              |
/// |--------|-------------------------------------|----------------------|
/// | GET    | `/api/people`                       | `find_all`           |
/// | POST   | `/api/people`                       | `create`             |
/// | GET    | `/api/people/{id}`                  | `find_by_id`         |
/// | PUT    | `/api/people/{id}`                  | `update`             |
/// | DELETE | `/api/people/{id}`                  | `delete_by_id`       |
/// | GET    | `/api/people/firstByName/{name}`    | `find_first_by_name` |
///
/// Anything else, including a known path with another method, is a plain 404.
pub fn configure(handler: Data<PersonHandler>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(handler)
            .app_data(web::PathConfig::default().error_handler(|err, _| {
                ApiError::InvalidInput(format!("invalid path parameter: {}", err)).into()
            }))
            .service(
                web::scope(API)
                    .service(
                        web::resource("")
                            .route(web::get().to(
                                |handler: Data<PersonHandler>| async move {
                                    handler.find_all().await
                                },
                            ))
                            .route(web::post().to(
                                |handler: Data<PersonHandler>, body: Bytes| async move {
                                    handler.create(&body).await
                                },
                            ))
                            .default_service(web::to(not_found)),
                    )
                    .service(
                        web::resource("/firstByName/{name}")
                            .route(web::get().to(
                                |handler: Data<PersonHandler>, name: Path<String>| async move {
                                    handler.find_first_by_name(&name).await
                                },
                            ))
                            .default_service(web::to(not_found)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(
                                |handler: Data<PersonHandler>, id: Path<PersonId>| async move {
                                    handler.find_by_id(id.into_inner()).await
                                },
                            ))
                            .route(web::put().to(
                                |handler: Data<PersonHandler>,
                                 id: Path<PersonId>,
                                 body: Bytes| async move {
                                    handler.update(id.into_inner(), &body).await
                                },
                            ))
                            .route(web::delete().to(
                                |handler: Data<PersonHandler>, id: Path<PersonId>| async move {
                                    handler.delete_by_id(id.into_inner()).await
                                },
                            ))
                            .default_service(web::to(not_found)),
                    ),
            )
            .default_service(web::to(not_found));
    }
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().finish()
}
