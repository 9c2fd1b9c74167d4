use anyhow::{Context, Result};
use log::info;
use sea_orm::sea_query::{IndexCreateStatement, TableCreateStatement};
use sea_orm::{
    ActiveValue, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema,
    TransactionTrait,
};

use crate::auth::password;
use crate::config::{BootstrapAdmin, DatabaseConfig};
use crate::entities::{cita, horario, medico, notificacion, observacion, persona, usuario, Genero, Rol};
use crate::repositories::{PersonaRepository, UsuarioRepository};

/// Database handle shared by the HTTP handlers.
#[derive(Clone, Debug)]
pub struct Storage {
    pub conn: DatabaseConnection,
}

impl Storage {
    /// Open a connection pool for the configured database.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        options.sqlx_logging(false);

        if is_in_memory(&config.url) {
            // Every pooled connection to `:memory:` would see its own database
            options.min_connections(1).max_connections(1);
        } else {
            options.max_connections(config.max_connections);
        }

        let conn = Database::connect(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", redact_url(&config.url)))?;

        Ok(Self { conn })
    }

    /// Open a fresh in-memory SQLite database with the schema applied.
    pub async fn in_memory() -> Result<Self> {
        let storage = Self::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await?;
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Create every table and index that does not exist yet.
    ///
    /// Tables are created parents first so foreign keys resolve.
    pub async fn init_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let tables: Vec<TableCreateStatement> = vec![
            schema.create_table_from_entity(persona::Entity),
            schema.create_table_from_entity(usuario::Entity),
            schema.create_table_from_entity(medico::Entity),
            schema.create_table_from_entity(horario::Entity),
            schema.create_table_from_entity(cita::Entity),
            schema.create_table_from_entity(notificacion::Entity),
            schema.create_table_from_entity(observacion::Entity),
        ];

        for mut table in tables {
            table.if_not_exists();
            self.conn
                .execute(backend.build(&table))
                .await
                .context("Failed to create table")?;
        }

        let indexes: Vec<IndexCreateStatement> = schema.create_index_from_entity(cita::Entity);
        for mut index in indexes {
            index.if_not_exists();
            self.conn
                .execute(backend.build(&index))
                .await
                .context("Failed to create index")?;
        }

        info!("Database schema ready");
        Ok(())
    }

    /// Create the first administrator account if no administrator exists.
    ///
    /// Returns `true` when an account was created.
    pub async fn ensure_admin(&self, admin: &BootstrapAdmin, password_iterations: u32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        if UsuarioRepository::count_with_rol(&txn, Rol::Administrador).await? > 0 {
            txn.rollback().await?;
            return Ok(false);
        }
        if UsuarioRepository::get_by_correo(&txn, &admin.correo).await?.is_some() {
            anyhow::bail!("Cannot bootstrap administrator: {} is already registered", admin.correo);
        }

        let contrasena = password::hash_password_blocking(admin.contrasena.clone(), password_iterations).await?;

        let persona = PersonaRepository::create(
            &txn,
            persona::ActiveModel {
                nombre: ActiveValue::Set(admin.nombre.clone()),
                apellido_paterno: ActiveValue::Set(String::new()),
                apellido_materno: ActiveValue::Set(String::new()),
                telefono: ActiveValue::Set(None),
                fecha_nacimiento: ActiveValue::Set(None),
                genero: ActiveValue::Set(Genero::Otro),
                direccion: ActiveValue::Set(None),
                ..Default::default()
            },
        )
        .await?;

        UsuarioRepository::create(
            &txn,
            usuario::ActiveModel {
                persona_id: ActiveValue::Set(persona.id),
                rol: ActiveValue::Set(Rol::Administrador),
                correo: ActiveValue::Set(admin.correo.clone()),
                contrasena: ActiveValue::Set(contrasena),
                ..Default::default()
            },
        )
        .await?;

        txn.commit().await?;
        info!("Bootstrap administrator {} created", admin.correo);
        Ok(true)
    }

    /// Check that the database answers queries.
    pub async fn ping(&self) -> Result<()> {
        self.conn.ping().await?;
        Ok(())
    }
}

/// Whether the URL points at a private in-memory SQLite database.
fn is_in_memory(url: &str) -> bool {
    url.starts_with("sqlite:") && (url.contains(":memory:") || url.contains("mode=memory"))
}

/// Hide the password part of a connection URL before logging it.
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = &url[scheme_end + 3..at];
            match credentials.find(':') {
                Some(colon) => format!("{}{}:***{}", &url[..scheme_end + 3], &credentials[..colon], &url[at..]),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}
