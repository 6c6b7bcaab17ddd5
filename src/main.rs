use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use car_rental_backend::config::environment::EnvironmentConfig;
use car_rental_backend::create_app;
use car_rental_backend::database::connection::{create_pool, run_migrations};
use car_rental_backend::services::payment_gateway::SimulatedGateway;
use car_rental_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Car Rental Backend - Reservas, contratos y pagos");
    info!("===================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    run_migrations(&pool).await?;
    info!("✅ Migraciones aplicadas");

    let gateway = Arc::new(
        SimulatedGateway::new(config.payment_gateway_delay_ms)
            .with_success_rate(config.payment_gateway_success_rate),
    );
    let app_state = AppState::new(pool, config.clone(), gateway);

    let app = create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚙 Endpoints - Cars:");
    info!("   GET  /api/cars - Listar flota (con filtros)");
    info!("   GET  /api/cars/:id - Obtener coche");
    info!("   POST /api/cars - Alta de coche (admin)");
    info!("   PUT  /api/cars/:id - Actualizar coche (admin)");
    info!("   DELETE /api/cars/:id - Baja de coche (admin)");
    info!("📅 Endpoints - Bookings:");
    info!("   POST /api/bookings/quote - Cotizar un rango de fechas");
    info!("   POST /api/bookings - Crear reserva");
    info!("   GET  /api/bookings - Listar reservas");
    info!("   GET  /api/bookings/:id - Obtener reserva");
    info!("   POST /api/bookings/:id/cancel - Cancelar reserva");
    info!("   PUT  /api/bookings/:id/status - Override de estado (admin)");
    info!("📝 Endpoints - Contracts:");
    info!("   POST /api/contracts/booking/:booking_id - Generar contrato");
    info!("   GET  /api/contracts - Listar contratos");
    info!("   GET  /api/contracts/:id - Obtener contrato");
    info!("   POST /api/contracts/:id/sign - Firmar contrato");
    info!("💰 Endpoints - Payments:");
    info!("   POST /api/payments - Procesar pago");
    info!("   GET  /api/payments/history - Historial de pagos");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
