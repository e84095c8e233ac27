//! Draw lookups against the `DrawsRestServices` endpoint
//!
//! Each operation builds an endpoint-relative path, performs exactly one GET
//! through [`OpapClient`] and unwraps the JSON envelope the service wraps
//! its results in.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::{ClientConfig, OpapClient, Response, DEFAULT_DRAWS_ENDPOINT};
use crate::error::Result;
use crate::types::{null_as_default, Draw, Game, PropoDraw, PropoGame};

// Missing and `null` fields both decode to their default, so "no data"
// comes back as a zero draw or an empty list.

/// `{"draw": {...}}`, returned by latest and by-number lookups
#[derive(Deserialize)]
#[serde(bound = "D: DeserializeOwned + Default")]
struct SingleDraw<D> {
    #[serde(default, deserialize_with = "null_as_default")]
    draw: D,
}

/// `{"draws": {"draw": [...]}}`, returned by by-date lookups
#[derive(Deserialize)]
#[serde(bound = "D: DeserializeOwned")]
struct DrawsByDate<D> {
    #[serde(default, deserialize_with = "null_as_default")]
    draws: DrawList<D>,
}

#[derive(Deserialize)]
#[serde(bound = "D: DeserializeOwned")]
struct DrawList<D> {
    #[serde(default, deserialize_with = "null_as_default")]
    draw: Vec<D>,
}

impl<D> Default for DrawList<D> {
    fn default() -> Self {
        Self { draw: Vec::new() }
    }
}

/// Client for the draws endpoint
///
/// # Example
/// ```no_run
/// use opap_core::{DrawsService, Game};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let draws = DrawsService::new()?;
///
///     let (draw, _) = draws.latest(Game::Joker).await?;
///     println!("Draw {} at {}: {:?}", draw.draw_no, draw.draw_time, draw.results);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DrawsService {
    client: OpapClient,
    /// Path segment prefixing every lookup (default: `DrawsRestServices`)
    pub endpoint: String,
}

impl DrawsService {
    /// Create a service with a default client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(OpapClient::new(None)?))
    }

    /// Create a service from a configuration, including its endpoint prefix.
    ///
    /// # Arguments
    /// * `config` - Client configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created or the base URL
    /// is invalid.
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: OpapClient::with_config(config)?,
            endpoint: config.draws_endpoint.clone(),
        })
    }

    /// Create a service around a pre-configured client.
    ///
    /// Useful for tests or for pointing at a different base URL.
    ///
    /// # Arguments
    /// * `client` - Pre-configured OpapClient instance
    pub fn with_client(client: OpapClient) -> Self {
        Self {
            client,
            endpoint: DEFAULT_DRAWS_ENDPOINT.to_string(),
        }
    }

    /// The underlying client, for raw requests.
    pub fn client(&self) -> &OpapClient {
        &self.client
    }

    /// Latest draw of a game.
    ///
    /// Requests `{endpoint}/{game}/last.json`. An empty envelope yields
    /// `Draw::default()`, not an error.
    ///
    /// # Errors
    /// Any error of [`OpapClient::get`], unchanged.
    pub async fn latest(&self, game: Game) -> Result<(Draw, Response)> {
        self.single(&self.last_path(game.as_str())).await
    }

    /// Draw of a game by its sequence number.
    ///
    /// Requests `{endpoint}/{game}/{number}.json`.
    ///
    /// # Arguments
    /// * `game` - Game to look up
    /// * `number` - Draw sequence number
    ///
    /// # Errors
    /// Any error of [`OpapClient::get`], unchanged.
    pub async fn by_number(&self, game: Game, number: u64) -> Result<(Draw, Response)> {
        self.single(&self.number_path(game.as_str(), number)).await
    }

    /// Draws of a game held on a date.
    ///
    /// Requests `{endpoint}/{game}/drawDate/{day}-{month}-{year}.json`. The
    /// numbers are rendered without zero padding, so day 5 becomes `5`.
    /// A date may have zero, one or several draws.
    ///
    /// # Arguments
    /// * `game` - Game to look up
    /// * `day` - Day of month
    /// * `month` - Month (1-based)
    /// * `year` - Four-digit year
    ///
    /// # Errors
    /// Any error of [`OpapClient::get`], unchanged.
    pub async fn by_date(
        &self,
        game: Game,
        day: u32,
        month: u32,
        year: u32,
    ) -> Result<(Vec<Draw>, Response)> {
        self.many(&self.date_path(game.as_str(), day, month, year))
            .await
    }

    /// Latest draw of a Propo game.
    ///
    /// # Errors
    /// Any error of [`OpapClient::get`], unchanged.
    pub async fn propo_latest(&self, game: PropoGame) -> Result<(PropoDraw, Response)> {
        self.single(&self.last_path(game.as_str())).await
    }

    /// Draw of a Propo game by its sequence number.
    ///
    /// # Errors
    /// Any error of [`OpapClient::get`], unchanged.
    pub async fn propo_by_number(
        &self,
        game: PropoGame,
        number: u64,
    ) -> Result<(PropoDraw, Response)> {
        self.single(&self.number_path(game.as_str(), number)).await
    }

    /// Draws of a Propo game held on a date. Same date rendering as
    /// [`by_date`](Self::by_date).
    ///
    /// # Errors
    /// Any error of [`OpapClient::get`], unchanged.
    pub async fn propo_by_date(
        &self,
        game: PropoGame,
        day: u32,
        month: u32,
        year: u32,
    ) -> Result<(Vec<PropoDraw>, Response)> {
        self.many(&self.date_path(game.as_str(), day, month, year))
            .await
    }

    async fn single<D>(&self, path: &str) -> Result<(D, Response)>
    where
        D: DeserializeOwned + Default,
    {
        let (envelope, response): (SingleDraw<D>, _) = self.client.get(path).await?;
        Ok((envelope.draw, response))
    }

    async fn many<D>(&self, path: &str) -> Result<(Vec<D>, Response)>
    where
        D: DeserializeOwned,
    {
        let (envelope, response): (DrawsByDate<D>, _) = self.client.get(path).await?;
        Ok((envelope.draws.draw, response))
    }

    fn last_path(&self, game: &str) -> String {
        format!("{}/{}/last.json", self.endpoint, game)
    }

    fn number_path(&self, game: &str, number: u64) -> String {
        format!("{}/{}/{}.json", self.endpoint, game, number)
    }

    fn date_path(&self, game: &str, day: u32, month: u32, year: u32) -> String {
        format!(
            "{}/{}/drawDate/{}-{}-{}.json",
            self.endpoint, game, day, month, year
        )
    }
}
